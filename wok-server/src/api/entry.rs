//! Landing entry point
//!
//! Customers arrive here two ways: a table QR code carrying
//! `?table=<id>`, or the chat-platform mini-app login redirect carrying a
//! percent-encoded internal path in `liff.state`. Both resolve to an
//! internal path the client navigates to.

use axum::{
    Router,
    extract::Query,
    response::Redirect,
    routing::get,
};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Deserialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/entry", get(entry))
}

#[derive(Debug, Deserialize)]
struct EntryQuery {
    table: Option<String>,
    #[serde(rename = "liff.state")]
    liff_state: Option<String>,
}

async fn entry(Query(query): Query<EntryQuery>) -> Redirect {
    let path = resolve_entry(query.table.as_deref(), query.liff_state.as_deref());
    Redirect::temporary(&path)
}

/// Resolve the landing parameters to an internal path.
///
/// `liff.state` wins over `table` (it is the QR payload round-tripped
/// through the chat login). Decoded paths must be internal: anything not
/// starting with a single `/` falls back to the root rather than becoming
/// an open redirect.
pub fn resolve_entry(table: Option<&str>, liff_state: Option<&str>) -> String {
    if let Some(state) = liff_state {
        let decoded = percent_decode_str(state).decode_utf8_lossy();
        if decoded.starts_with('/') && !decoded.starts_with("//") {
            return decoded.into_owned();
        }
        tracing::warn!(state, "Rejected non-internal liff.state path");
        return "/".to_string();
    }

    if let Some(table) = table {
        if !table.trim().is_empty() {
            let encoded = utf8_percent_encode(table, NON_ALPHANUMERIC);
            return format!("/menu?table={encoded}");
        }
    }

    "/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_param_routes_to_scoped_menu() {
        assert_eq!(resolve_entry(Some("7"), None), "/menu?table=7");
    }

    #[test]
    fn table_values_are_encoded() {
        assert_eq!(resolve_entry(Some("a b"), None), "/menu?table=a%20b");
    }

    #[test]
    fn liff_state_wins_and_is_decoded() {
        assert_eq!(
            resolve_entry(Some("9"), Some("%2Fmenu%3Ftable%3D7")),
            "/menu?table=7"
        );
    }

    #[test]
    fn external_liff_state_falls_back_to_root() {
        assert_eq!(resolve_entry(None, Some("https%3A%2F%2Fevil.example")), "/");
        assert_eq!(resolve_entry(None, Some("%2F%2Fevil.example")), "/");
    }

    #[test]
    fn nothing_goes_home() {
        assert_eq!(resolve_entry(None, None), "/");
        assert_eq!(resolve_entry(Some("  "), None), "/");
    }
}
