use entity::{courts, venues};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

/// Reconcile the denormalized `number_of_courts` on every venue with the
/// actual count of its courts.
pub async fn run(db: &DatabaseConnection) -> Result<(), DbErr> {
    let all_venues = venues::Entity::find().all(db).await?;

    let mut updated_count = 0usize;
    for venue in all_venues {
        let actual = courts::Entity::find()
            .filter(courts::Column::VenueId.eq(venue.id))
            .count(db)
            .await? as i32;

        if venue.number_of_courts != actual {
            let name = venue.name.clone();
            let old = venue.number_of_courts;
            let mut active: venues::ActiveModel = venue.into();
            active.number_of_courts = Set(actual);
            active.updated_at = Set(chrono::Utc::now().naive_utc());
            active.update(db).await?;
            updated_count += 1;
            println!("Updated venue \"{}\": {} -> {} courts", name, old, actual);
        }
    }

    if updated_count == 0 {
        println!("All venues already have correct court counts");
    } else {
        println!("Successfully updated {} venue(s)", updated_count);
    }

    Ok(())
}
