//! Challenge messages: `<address>:<unix-seconds>:<tag>`.
//!
//! The embedded timestamp is the anchor for the staleness check; the
//! registry keeps no record of issued challenges. Fields are split from the
//! right: the timestamp and tag never contain the separator, the address may.

use super::error::RegistryError;
use crate::config::MESSAGE_SEPARATOR;

/// A parsed challenge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge<'a> {
    pub address: &'a str,
    pub issued_at: u64,
    pub tag: &'a str,
}

/// Build the message a wallet must sign.
pub fn build_message(address: &str, issued_at: u64, tag: &str) -> String {
    format!(
        "{address}{sep}{issued_at}{sep}{tag}",
        sep = MESSAGE_SEPARATOR
    )
}

/// Split a message into its three fields.
pub fn parse_message(message: &str) -> Result<Challenge<'_>, RegistryError> {
    let mut parts = message.rsplitn(3, MESSAGE_SEPARATOR);
    let (Some(tag), Some(time), Some(address)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RegistryError::MalformedMessage(
            "expected <address>:<timestamp>:<tag>".to_string(),
        ));
    };

    let issued_at = time.parse::<u64>().map_err(|_| {
        RegistryError::MalformedMessage(format!("timestamp {:?} is not a number", time))
    })?;

    Ok(Challenge {
        address,
        issued_at,
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_matches_wire_format() {
        assert_eq!(
            build_message("addr1", 1_700_000_000, "starRegistry"),
            "addr1:1700000000:starRegistry"
        );
    }

    #[test]
    fn parse_reads_all_fields() {
        let c = parse_message("addr1:42:starRegistry").unwrap();
        assert_eq!(
            c,
            Challenge {
                address: "addr1",
                issued_at: 42,
                tag: "starRegistry"
            }
        );
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        for bad in ["", "addr1", "addr1:42"] {
            let err = parse_message(bad).unwrap_err();
            assert!(matches!(err, RegistryError::MalformedMessage(_)), "{bad}");
        }
    }

    #[test]
    fn address_may_contain_separator() {
        let message = build_message("eip155:1:0xabc", 42, "starRegistry");
        let c = parse_message(&message).unwrap();
        assert_eq!(c.address, "eip155:1:0xabc");
        assert_eq!(c.issued_at, 42);
        assert_eq!(c.tag, "starRegistry");
    }

    #[test]
    fn trailing_extra_field_shifts_timestamp() {
        // The last two fields must be <timestamp>:<tag>.
        let err = parse_message("addr1:42:starRegistry:extra").unwrap_err();
        assert!(matches!(err, RegistryError::MalformedMessage(_)));
    }

    #[test]
    fn parse_rejects_non_numeric_timestamp() {
        for bad in ["addr1:soon:starRegistry", "addr1:-5:starRegistry", "addr1::starRegistry"] {
            assert!(matches!(
                parse_message(bad),
                Err(RegistryError::MalformedMessage(_))
            ));
        }
    }
}
