//! Process-local store implementations

mod member;

pub use member::InMemoryMemberRepository;
