pub mod pending_transaction_repo;
