//! Sled Storage - 嵌入式键值存储

mod word_list_repo;

pub use word_list_repo::SledWordListRepository;
