use trend_poster::twitter::oauth::{percent_encode, signature};
use trend_poster::{Credentials, OAuthSigner};

// Worked example from the X developer documentation, "Creating a signature".
const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
const TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
const TIMESTAMP: i64 = 1318622958;
const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
const STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";
const EXPECTED_SIGNATURE: &str = "hCtSmYh+iHYCEqBWrE7C7hYmtUk=";

fn request_params() -> Vec<(String, String)> {
    vec![
        ("status".to_string(), STATUS.to_string()),
        ("include_entities".to_string(), "true".to_string()),
    ]
}

#[test]
fn test_percent_encoding_is_rfc3986() {
    assert_eq!(
        percent_encode(STATUS),
        "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
    );
    assert_eq!(percent_encode("safe-._~AZaz09"), "safe-._~AZaz09");
}

#[test]
fn test_signature_matches_reference_example() {
    let mut params = request_params();
    params.extend([
        ("oauth_consumer_key".to_string(), CONSUMER_KEY.to_string()),
        ("oauth_nonce".to_string(), NONCE.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), TIMESTAMP.to_string()),
        ("oauth_token".to_string(), TOKEN.to_string()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]);

    let sig = signature("POST", URL, &params, CONSUMER_SECRET, TOKEN_SECRET).unwrap();
    assert_eq!(sig, EXPECTED_SIGNATURE);
}

#[test]
fn test_authorization_header() {
    let signer = OAuthSigner::new(Credentials {
        api_key: CONSUMER_KEY.to_string(),
        api_secret: CONSUMER_SECRET.to_string(),
        access_token: TOKEN.to_string(),
        access_secret: TOKEN_SECRET.to_string(),
    });

    let header = signer
        .authorization_header_with("POST", URL, &request_params(), NONCE, TIMESTAMP)
        .unwrap();

    assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
    assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
    assert!(header.contains("oauth_timestamp=\"1318622958\""));
    assert!(header.ends_with("oauth_version=\"1.0\""));
    // Request parameters are signed but not echoed in the header.
    assert!(!header.contains("status"));
}

#[test]
fn test_fresh_headers_use_new_nonces() {
    let signer = OAuthSigner::new(Credentials {
        api_key: CONSUMER_KEY.to_string(),
        api_secret: CONSUMER_SECRET.to_string(),
        access_token: TOKEN.to_string(),
        access_secret: TOKEN_SECRET.to_string(),
    });

    let a = signer.authorization_header("POST", URL, &[]).unwrap();
    let b = signer.authorization_header("POST", URL, &[]).unwrap();
    assert_ne!(a, b);
}
