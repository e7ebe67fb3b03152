pub mod activity_logs;
pub mod bookings;
pub mod court_sessions;
pub mod courts;
pub mod facilities;
pub mod operational_hours;
pub mod payments;
pub mod pendapatan;
pub mod reviews;
pub mod sports_categories;
pub mod users;
pub mod venue_facilities;
pub mod venues;
