pub mod price_repo;
