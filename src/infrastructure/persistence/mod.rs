mod in_memory_call_repository;

pub use in_memory_call_repository::InMemoryCallRepository;
