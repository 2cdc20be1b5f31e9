//! Destination URI normalization

use crate::account::Account;

/// Expand a bare destination into a full SIP URI using account realm
/// information.
///
/// A destination that already carries a `sip:` scheme is returned
/// unchanged. Otherwise the realm is the account's explicit registrar when
/// one is set, and the account domain otherwise — truncated just after the
/// first colon when the domain carries a port.
///
/// Bad input passes through: an account with neither registrar nor domain
/// yields the syntactically malformed `"sip:dest@"`.
///
/// ```
/// use sip_endpoint::{uri::normalize_destination, Account};
/// use serde_json::json;
///
/// let account: Account =
///     serde_json::from_value(json!({"domain": "pbx.com"})).unwrap();
/// assert_eq!(normalize_destination(&account, "100"), "sip:100@pbx.com");
/// ```
pub fn normalize_destination(account: &Account, destination: &str) -> String {
    if destination.starts_with("sip:") {
        return destination.to_string();
    }

    let realm = match account.reg_server() {
        Some(server) if !server.is_empty() => server.to_string(),
        _ => {
            let domain = account.domain();
            match domain.find(':') {
                // Keep the colon itself; the engine tolerates the trailing
                // separator and the port must not leak into the realm.
                Some(idx) if idx > 0 => domain[..=idx].to_string(),
                _ => domain.to_string(),
            }
        }
    };

    format!("sip:{destination}@{realm}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(domain: &str, reg_server: Option<&str>) -> Account {
        let mut payload = json!({ "domain": domain });
        if let Some(server) = reg_server {
            payload["regServer"] = json!(server);
        }
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn appends_explicit_reg_server_verbatim() {
        let account = account("ignored.example.com:9999", Some("sip.pbx.com"));
        assert_eq!(
            normalize_destination(&account, "100"),
            "sip:100@sip.pbx.com"
        );
    }

    #[test]
    fn falls_back_to_domain() {
        let account = account("pbx.com", None);
        assert_eq!(normalize_destination(&account, "100"), "sip:100@pbx.com");
    }

    #[test]
    fn strips_domain_port_keeping_colon() {
        let account = account("pbx.com:5061", None);
        assert_eq!(normalize_destination(&account, "100"), "sip:100@pbx.com:");
    }

    #[test]
    fn sip_prefixed_destination_passes_through() {
        let account = account("pbx.com", Some("sip.pbx.com"));
        assert_eq!(
            normalize_destination(&account, "sip:alice@elsewhere.net"),
            "sip:alice@elsewhere.net"
        );
    }

    #[test]
    fn empty_reg_server_falls_back_to_domain() {
        let account = account("pbx.com", Some(""));
        assert_eq!(normalize_destination(&account, "100"), "sip:100@pbx.com");
    }

    #[test]
    fn empty_realm_passes_through_malformed() {
        let account = account("", None);
        assert_eq!(normalize_destination(&account, "100"), "sip:100@");
    }
}
