pub mod identity_queries;
pub mod relationship_queries;
pub mod family_queries;
pub mod post_queries;
pub mod profile_queries;
