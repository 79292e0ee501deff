use url::Url;

use crate::constants::{PAYMENT_ID_META, STORE_ID_META};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    pub origin: String,
    pub store_id: Option<String>,
    pub payment_id: Option<String>,
}

impl PageConfig {
    pub fn from_lookup<F>(origin: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            store_id: meta_value(&lookup, STORE_ID_META),
            payment_id: meta_value(&lookup, PAYMENT_ID_META),
        }
    }

    pub fn payment_status_url(&self) -> Option<String> {
        let payment_id = self.payment_id.as_deref()?;
        let mut url = Url::parse(&self.origin).ok()?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            _ => return None,
        };
        url.set_scheme(scheme).ok()?;
        url.path_segments_mut()
            .ok()?
            .clear()
            .extend(["ws", "payment", payment_id, "status"]);
        Some(url.to_string())
    }
}

fn meta_value<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
