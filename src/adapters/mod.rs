pub mod api_errors;
pub mod midtrans;
pub mod midtrans_client;
