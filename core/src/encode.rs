//! `application/x-www-form-urlencoded` encoding of a [`Params`] map.

use form_urlencoded::Serializer;

use crate::types::Params;

/// Encode `params` as `key=value&key2=value2`, sorted by key.
///
/// Repeated keys are kept as separate pairs in their insertion order.
pub fn encode(params: &Params) -> String {
    let mut pairs: Vec<(&str, String)> = params
        .iter()
        .map(|(key, value)| (key, value.to_query_value()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
