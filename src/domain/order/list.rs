use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::Order;
use super::status::OrderStatus;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_PAGE: u32 = 1;

/// Filters and paging for listing orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListRequest {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub query: Option<String>,
    pub customer_id: Option<String>,
    pub order_status: Option<OrderStatus>,
    pub from_created_at: Option<NaiveDate>,
    pub to_created_at: Option<NaiveDate>,
    pub sort: Option<String>,
}

impl OrderListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.order_status = Some(status);
        self
    }

    pub fn with_created_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_created_at = Some(from);
        self.to_created_at = Some(to);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Query parameters in wire order; paging always present, filters only when set.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string()),
            ("page", self.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ];

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            params.push(("query", query.to_string()));
        }
        if let Some(customer_id) = self.customer_id.as_deref().filter(|c| !c.is_empty()) {
            params.push(("customer_id", customer_id.to_string()));
        }
        if let Some(status) = self.order_status {
            params.push(("order_status", status.as_str().to_string()));
        }
        if let Some(from) = self.from_created_at {
            params.push(("from_created_at", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_created_at {
            params.push(("to_created_at", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sort", sort.to_string()));
        }

        params
    }
}

/// One page of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderListResponse {
    #[serde(default)]
    pub data: Vec<Order>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl OrderListResponse {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}
