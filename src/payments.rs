use std::cell::Cell;

use url::form_urlencoded;

use crate::constants::{DEFAULT_PAYMENTS_LIMIT, DEFAULT_PAYMENTS_PAGE, PAYMENT_TABLE_COLUMNS};
use crate::models::Payment;

const DERO_CURRENCY: &str = "DERO";
const PLACEHOLDER_CELL: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentsQuery {
    pub limit: u32,
    pub page: u32,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
}

impl Default for PaymentsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAYMENTS_LIMIT,
            page: DEFAULT_PAYMENTS_PAGE,
            sort_by: None,
            order_by: None,
            status: None,
            currency: None,
        }
    }
}

impl PaymentsQuery {
    pub fn from_controls(
        limit: &str,
        sort: &str,
        status: &str,
        currency: &str,
        page: Option<u32>,
    ) -> Self {
        let limit = limit
            .trim()
            .parse::<u32>()
            .unwrap_or(DEFAULT_PAYMENTS_LIMIT);
        let mut sort_parts = sort.splitn(2, '|');
        let sort_by = non_empty(sort_parts.next().unwrap_or_default());
        let order_by = non_empty(sort_parts.next().unwrap_or_default());

        Self {
            limit,
            page: page.filter(|page| *page > 0).unwrap_or(DEFAULT_PAYMENTS_PAGE),
            sort_by,
            order_by,
            status: non_empty(status),
            currency: non_empty(currency),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("limit", &self.limit.to_string());
        serializer.append_pair("page", &self.page.to_string());
        let optional = [
            ("sort_by", &self.sort_by),
            ("order_by", &self.order_by),
            ("status", &self.status),
            ("currency", &self.currency),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        format!("?{}", serializer.finish())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRow {
    pub class_name: Option<&'static str>,
    pub cells: Vec<String>,
}

impl PaymentRow {
    pub fn from_payment(payment: &Payment) -> Self {
        let creation_time = payment
            .creation_time
            .map(|time| time.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
            .unwrap_or_else(|| PLACEHOLDER_CELL.to_string());
        let exchange_rate = if payment.currency == DERO_CURRENCY {
            PLACEHOLDER_CELL.to_string()
        } else {
            format!("1 DERO = {} {}", payment.exchange_rate, payment.currency)
        };

        Self {
            class_name: Some(payment.status.row_class()),
            cells: vec![
                creation_time,
                payment.status.as_str().to_string(),
                payment.dero_amount.clone(),
                payment.payment_id.clone(),
                payment.integrated_address.clone(),
                payment.atomic_dero_amount.to_string(),
                payment.currency.clone(),
                payment.currency_amount.to_string(),
                exchange_rate,
                format!("{} min(s)", payment.ttl),
            ],
        }
    }

    pub fn placeholder() -> Self {
        Self {
            class_name: None,
            cells: vec![PLACEHOLDER_CELL.to_string(); PAYMENT_TABLE_COLUMNS],
        }
    }
}

pub fn table_rows(payments: &[Payment]) -> Vec<PaymentRow> {
    if payments.is_empty() {
        return vec![PaymentRow::placeholder()];
    }
    payments.iter().map(PaymentRow::from_payment).collect()
}

/// Hands out increasing tickets so that only the most recent payments
/// request is allowed to update the table.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn begin(&self) -> u64 {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::PaymentStatus;

    fn sample_payment() -> Payment {
        Payment {
            creation_time: Some(Utc.with_ymd_and_hms(2026, 10, 14, 10, 0, 5).unwrap()),
            status: PaymentStatus::Paid,
            dero_amount: "1.50000".to_string(),
            payment_id: "f00d".to_string(),
            integrated_address: "dETi-addr".to_string(),
            atomic_dero_amount: 1_500_000_000_000,
            currency: "USD".to_string(),
            currency_amount: 3.5,
            exchange_rate: 2.3333,
            ttl: 15,
        }
    }

    #[test]
    fn query_defaults_when_controls_are_empty() {
        let query = PaymentsQuery::from_controls("", "", "", "", None);
        assert_eq!(query, PaymentsQuery::default());
        assert_eq!(query.to_query_string(), "?limit=10&page=1");
    }

    #[test]
    fn query_splits_sort_and_order() {
        let query =
            PaymentsQuery::from_controls("25", "currency_amount|asc", "paid", "USD", Some(3));
        assert_eq!(query.limit, 25);
        assert_eq!(query.page, 3);
        assert_eq!(query.sort_by.as_deref(), Some("currency_amount"));
        assert_eq!(query.order_by.as_deref(), Some("asc"));
        assert_eq!(
            query.to_query_string(),
            "?limit=25&page=3&sort_by=currency_amount&order_by=asc&status=paid&currency=USD"
        );
    }

    #[test]
    fn query_encodes_values() {
        let query = PaymentsQuery::from_controls("x", "", "", "a&b", Some(0));
        assert_eq!(query.limit, 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.to_query_string(), "?limit=10&page=1&currency=a%26b");
    }

    #[test]
    fn with_page_keeps_filters() {
        let query = PaymentsQuery::from_controls("5", "creation_time|desc", "", "", None);
        let next = query.with_page(4);
        assert_eq!(next.page, 4);
        assert_eq!(next.sort_by, query.sort_by);
        assert_eq!(next.limit, 5);
    }

    #[test]
    fn row_formats_every_column() {
        let row = PaymentRow::from_payment(&sample_payment());
        assert_eq!(row.class_name, Some("table-success"));
        assert_eq!(
            row.cells,
            vec![
                "Wed, 14 Oct 2026 10:00:05 GMT",
                "paid",
                "1.50000",
                "f00d",
                "dETi-addr",
                "1500000000000",
                "USD",
                "3.5",
                "1 DERO = 2.3333 USD",
                "15 min(s)",
            ]
        );
    }

    #[test]
    fn dero_payments_have_no_exchange_rate() {
        let mut payment = sample_payment();
        payment.currency = "DERO".to_string();
        payment.status = PaymentStatus::Expired;
        let row = PaymentRow::from_payment(&payment);
        assert_eq!(row.cells[8], "-");
        assert_eq!(row.class_name, Some("table-secondary"));
    }

    #[test]
    fn empty_page_renders_placeholder_row() {
        let rows = table_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_name, None);
        assert_eq!(rows[0].cells.len(), PAYMENT_TABLE_COLUMNS);
        assert!(rows[0].cells.iter().all(|cell| cell == "-"));
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let sequence = RequestSequence::default();
        let first = sequence.begin();
        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }
}
