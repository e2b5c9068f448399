//! Order API data types.

mod list;
mod order;
mod status;

pub use list::{OrderListRequest, OrderListResponse, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use order::Order;
pub use status::OrderStatus;
