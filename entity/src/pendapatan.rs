use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

/// Revenue ledger entry: one row per booking that generated commission
/// for a mitra (venue owner).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pendapatan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mitra_id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    /// Platform commission percentage, fixed at 10.00 in application code.
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
    pub net_amount: Decimal,
    /// One of "pending", "paid", "refunded".
    pub payment_status: String,
    pub paid_at: Option<DateTime>,
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MitraId",
        to = "super::users::Column::Id"
    )]
    Mitra,
    #[sea_orm(
        belongs_to = "super::bookings::Entity",
        from = "Column::BookingId",
        to = "super::bookings::Column::Id"
    )]
    Booking,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mitra.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

/// Commission split: `(commission, net)` where `commission = amount * rate / 100`
/// and `net = amount - commission`. The two parts always sum back to `amount`.
pub fn split_commission(amount: Decimal, rate: Decimal) -> (Decimal, Decimal) {
    let commission = amount * rate / Decimal::from(100);
    (commission, amount - commission)
}

fn current<V: Clone>(value: &ActiveValue<V>) -> Option<V>
where
    sea_orm::Value: From<V>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.clone()),
        ActiveValue::NotSet => None,
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Derived columns follow amount/rate on every write, not just insert.
    /// Editing either after creation rewrites commission_amount and net_amount.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let (Some(amount), Some(rate)) = (current(&self.amount), current(&self.commission_rate)) {
            let (commission, net) = split_commission(amount, rate);
            self.commission_amount = Set(commission);
            self.net_amount = Set(net);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::split_commission;
    use sea_orm::prelude::Decimal;

    #[test]
    fn ten_percent_split() {
        let (commission, net) = split_commission(Decimal::new(20000000, 2), Decimal::new(1000, 2));
        assert_eq!(commission, Decimal::new(2000000, 2));
        assert_eq!(net, Decimal::new(18000000, 2));
    }

    #[test]
    fn parts_sum_to_amount() {
        for (amount, rate) in [
            (Decimal::new(15000000, 2), Decimal::new(1000, 2)),
            (Decimal::new(9999, 2), Decimal::new(750, 2)),
            (Decimal::new(100, 2), Decimal::ZERO),
        ] {
            let (commission, net) = split_commission(amount, rate);
            assert_eq!(commission + net, amount);
        }
    }

    #[test]
    fn zero_rate_keeps_full_amount() {
        let (commission, net) = split_commission(Decimal::new(50000, 0), Decimal::ZERO);
        assert_eq!(commission, Decimal::ZERO);
        assert_eq!(net, Decimal::new(50000, 0));
    }
}
