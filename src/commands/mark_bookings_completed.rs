use entity::bookings;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

/// Flip paid pending/confirmed bookings whose end time has passed to
/// completed. Safe to re-run: already-completed rows are never revisited.
/// Not safe to run two instances at once; no locking is taken.
pub async fn run(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().naive_utc();

    let candidates = bookings::Entity::find()
        .filter(bookings::Column::BookingStatus.is_in(["pending", "confirmed"]))
        .filter(bookings::Column::PaymentStatus.eq("paid"))
        .all(db)
        .await?;

    let mut completed_count = 0usize;
    for booking in candidates {
        let ends_at = booking.booking_date.and_time(booking.end_time);
        if ends_at < now {
            let id = booking.id;
            let date = booking.booking_date;
            let mut active: bookings::ActiveModel = booking.into();
            active.booking_status = Set("completed".to_string());
            active.updated_at = Set(now);
            active.update(db).await?;
            completed_count += 1;
            println!("✓ Completed booking {} on {}", id, date);
        }
    }

    if completed_count == 0 {
        println!("No bookings to mark as completed");
    } else {
        println!("Total bookings marked as completed: {}", completed_count);
    }

    Ok(())
}
