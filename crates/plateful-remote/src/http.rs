use reqwest::Client;

/// Environment variable to bypass the system proxy for backend calls.
const DISABLE_SYSTEM_PROXY_ENV: &str = "PLATEFUL_DISABLE_SYSTEM_PROXY";

pub(crate) fn build_http_client() -> Client {
    // Proxies are bypassed under test so local mock servers are reachable.
    let disable_proxy = std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() || cfg!(test);

    if disable_proxy {
        Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build reqwest client")
    } else {
        Client::new()
    }
}
