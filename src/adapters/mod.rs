mod reqwest_request_dispatcher;

pub use reqwest_request_dispatcher::ReqwestRequestDispatcher;
