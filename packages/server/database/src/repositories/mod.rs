pub mod board_repo;
pub mod item_repo;

pub use board_repo::BoardRepository;
pub use item_repo::ItemRepository;
