//! Verify URL building against JSON test vectors stored in `test-vectors/`.
//!
//! Parameters are listed as `[key, value]` pairs so repeated keys and
//! insertion order survive the JSON file.

use simplehttp_core::{Client, HttpMethod, Params};

fn params_from(case: &serde_json::Value) -> Params {
    case["params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].clone())
        })
        .collect()
}

#[test]
fn request_url_test_vectors() {
    let raw = include_str!("../../test-vectors/request_url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = Client::new(case["endpoint"].as_str().unwrap()).unwrap();
        let path = case["path"].as_str().unwrap();
        let expected = case["expected_url"].as_str().unwrap();

        let (url, req) = match case["raw_query"].as_str() {
            Some(raw_query) => (
                client.build_request_url_raw(path, raw_query),
                client.build_get_raw(path, raw_query, None),
            ),
            None => {
                let params = params_from(case);
                (
                    client.build_request_url(path, Some(&params)),
                    client.build_get(path, Some(&params), None),
                )
            }
        };

        assert_eq!(url.as_str(), expected, "{name}: url");
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
        assert_eq!(req.url, url, "{name}: request url");
        assert!(req.body.is_none(), "{name}: body");
    }
}

#[test]
fn form_bodies_match_query_encoding() {
    let raw = include_str!("../../test-vectors/request_url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        if case["params"].is_null() {
            continue;
        }
        let name = case["name"].as_str().unwrap();
        let client = Client::new(case["endpoint"].as_str().unwrap()).unwrap();
        let params = params_from(case);
        let path = case["path"].as_str().unwrap();

        let url = client.build_request_url(path, Some(&params));
        let req = client.build_form(HttpMethod::Post, path, Some(&params), None);

        assert_eq!(req.url.query(), None, "{name}: form url has no query");
        assert_eq!(
            req.body.map(String::from_utf8).transpose().unwrap(),
            url.query().map(str::to_string),
            "{name}: body"
        );
    }
}
