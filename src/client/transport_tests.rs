//! Tests for `ReqwestClient`.

use super::*;

mod reqwest_client {
    use super::*;

    #[test]
    fn debug_format_is_readable() {
        let client = ReqwestClient::new();

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn with_timeout_builds_client() {
        let client = ReqwestClient::with_timeout(std::time::Duration::from_secs(5));

        assert!(client.is_ok());
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            ReqwestClient::from_client(reqwest::Client::builder().no_proxy().build().unwrap());
        let url = url::Url::parse(&format!("http://{addr}/")).unwrap();

        let result = client.request(HttpRequest::new(http::Method::GET, url)).await;

        assert!(matches!(result, Err(HttpError::Connection(_))));
    }

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("ftp://example.com/file").unwrap();

        let result = client.request(HttpRequest::new(http::Method::GET, url)).await;

        assert!(result.is_err());
    }
}
