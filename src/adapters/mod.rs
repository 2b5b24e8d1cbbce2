pub mod api_errors;
pub mod square_client;
pub mod supabase_client;
pub mod webhook;
