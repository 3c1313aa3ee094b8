//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn bind_displays_address() {
        let error = RunError::Bind {
            addr: "127.0.0.1:80".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };

        assert!(error.to_string().starts_with("Failed to bind 127.0.0.1:80"));
    }

    #[test]
    fn upstream_displays_detailed_error() {
        let error = RunError::Upstream(hookkit::error::Error::with_cause(
            "cannot initialize upstream transport",
            500,
            "no TLS backend",
        ));

        assert_eq!(
            error.to_string(),
            "Failed to build upstream client: ERROR (500): cannot initialize upstream transport; \
             inner error: no TLS backend"
        );
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::Serve(io::Error::from(io::ErrorKind::BrokenPipe));
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("Serve"));
    }
}

mod relay_state {
    use super::*;
    use hookkit::config::Cli;

    fn config(args: &[&str]) -> ValidatedConfig {
        let mut full_args = vec!["hookkit"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
    }

    #[test]
    fn without_upstream() {
        let state = build_state(&config(&[])).unwrap();

        assert!(state.upstream().is_none());
    }

    #[test]
    fn with_upstream_and_headers() {
        let state = build_state(&config(&[
            "--upstream",
            "https://hooks.example.com/api/",
            "--user-agent",
            "",
        ]))
        .unwrap();

        let client = state.upstream().unwrap();
        assert_eq!(client.base_url().as_str(), "https://hooks.example.com/api/");
    }
}

mod lifecycle {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use hookkit::error::RenderMode;
    use hookkit::shutdown::Signal;

    #[tokio::test]
    async fn serves_until_signal_then_exits_cleanly() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let exits = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&exits);
        let coordinator = ShutdownCoordinator::new(Duration::from_millis(20))
            .with_exit(move |code| recorded.lock().unwrap().push(code));
        let signals = coordinator.sender();
        let app = router(RelayState::new(), RenderMode::Standard);

        let server = tokio::spawn(serve(listener, app, coordinator));

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let response = http
            .get(format!("http://{addr}/health"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        assert!(signals.send(Signal::Terminate));
        server.await.unwrap().unwrap();

        assert_eq!(*exits.lock().unwrap(), vec![0]);
    }
}
