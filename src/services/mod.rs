// Service exports
pub mod cache;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheStats, RecordCache};
pub use supabase::{decode_rows, SupabaseClient, SupabaseError};
