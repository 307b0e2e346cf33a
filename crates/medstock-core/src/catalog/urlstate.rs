//! Bidirectional mapping between `FilterState` and the page's query string.
//!
//! The address bar is the sole persisted representation of a catalog view:
//! navigation decodes it, commits encode it, and back/forward therefore
//! reproduce the exact prior state. Recognized parameters are `search`,
//! `modality`, `brand`, `location` and `page` (1-based, default 1).

use crate::catalog::types::FilterState;

/// Decode a query string (without the leading `?`) into a `FilterState`.
///
/// Unrecognized parameters are ignored; a missing or unparsable `page`
/// defaults to 1.
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_default();
        match key {
            "search" => state.keyword = value,
            "modality" => state.modality = value,
            "brand" => state.brand = value,
            "location" => state.location = value,
            "page" => state.page = value.parse().unwrap_or(1).max(1),
            _ => {}
        }
    }
    state
}

/// Encode a `FilterState` as a query string (without the leading `?`).
///
/// Empty terms are omitted; `page` is written only when it is not the
/// default, so a fresh view keeps a clean address.
pub fn encode(state: &FilterState) -> String {
    let mut pairs: Vec<String> = Vec::new();
    let mut push = |key: &str, value: &str| {
        if !value.is_empty() {
            pairs.push(format!("{}={}", key, urlencoding::encode(value)));
        }
    };
    push("search", &state.keyword);
    push("modality", &state.modality);
    push("brand", &state.brand);
    push("location", &state.location);
    if state.page > 1 {
        pairs.push(format!("page={}", state.page));
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_full_state() {
        let state = FilterState {
            keyword: "head coil".into(),
            modality: "MRI".into(),
            brand: "Siemens & Co".into(),
            location: "PALLET ON-SHELF".into(),
            page: 3,
        };
        assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn test_round_trip_default_state_is_empty() {
        let state = FilterState::default();
        let encoded = encode(&state);
        assert_eq!(encoded, "");
        assert_eq!(decode(&encoded), state);
    }

    #[test]
    fn test_decode_ignores_unknown_params() {
        let state = decode("search=coil&utm_source=mail&brand=GE");
        assert_eq!(state.keyword, "coil");
        assert_eq!(state.brand, "GE");
    }

    #[test]
    fn test_decode_bad_page_defaults_to_one() {
        assert_eq!(decode("page=abc").page, 1);
        assert_eq!(decode("page=0").page, 1);
        assert_eq!(decode("").page, 1);
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let state = FilterState {
            keyword: "a&b=c".into(),
            ..FilterState::default()
        };
        let encoded = encode(&state);
        assert_eq!(encoded, "search=a%26b%3Dc");
        assert_eq!(decode(&encoded).keyword, "a&b=c");
    }

    #[test]
    fn test_page_one_is_omitted() {
        let state = FilterState {
            keyword: "coil".into(),
            page: 1,
            ..FilterState::default()
        };
        assert_eq!(encode(&state), "search=coil");
    }
}
