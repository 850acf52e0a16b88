pub mod roster_cache;
