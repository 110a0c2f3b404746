pub mod tomato_repo;

pub use tomato_repo::TomatoRepo;
