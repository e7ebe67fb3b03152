pub mod mark_bookings_completed;
pub mod sync_court_counts;
