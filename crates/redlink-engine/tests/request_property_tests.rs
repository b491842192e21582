//! Property tests for the request builder

use proptest::prelude::*;
use redlink_config::RedlinkConfig;
use redlink_core::ContentBlob;
use redlink_engine::build_request;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9._~-]{0,24}"
}

proptest! {
    #[test]
    fn prop_path_and_key(
        app in segment(),
        key in "[ -~]{1,40}",
        version in proptest::option::of("[0-9]{1,2}\\.[0-9]{1,2}"),
        text in ".{0,200}",
    ) {
        prop_assume!(!key.trim().is_empty());

        let mut config = RedlinkConfig::new(app.clone(), key.clone()).unwrap();
        if let Some(version) = &version {
            config = config.with_version(version.clone());
        }
        let blob = ContentBlob::from_text(text.clone());

        let request = build_request(&config, &blob, "urn:content:1").unwrap();
        let url = request.url();

        let expected_version = version.as_deref().unwrap_or("1.0");
        prop_assert_eq!(
            url.path(),
            format!("/{}/analysis/{}/enhance", expected_version, app)
        );

        let keys: Vec<String> = url
            .query_pairs()
            .filter(|(name, _)| name == "key")
            .map(|(_, value)| value.into_owned())
            .collect();
        prop_assert_eq!(keys, vec![key]);
        prop_assert_eq!(url.query_pairs().count(), 1);

        prop_assert_eq!(request.body().map(|b| b.to_vec()), Some(text.into_bytes()));
        prop_assert!(!request.is_idempotent());
    }
}
