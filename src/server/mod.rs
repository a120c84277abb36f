mod http;

pub use http::Server;
