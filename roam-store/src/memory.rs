use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use roam_catalog::{Experience, PromoCode, Slot};
use roam_core::{
    Booking, BookingRepository, ExperienceRepository, PromoRepository, SlotRepository, StoreError,
};

#[derive(Default)]
struct Inner {
    experiences: HashMap<Uuid, Experience>,
    slots: HashMap<Uuid, Slot>,
    // keyed by lowercased code, matching the store's case-insensitive lookup
    promos: HashMap<String, PromoCode>,
    bookings: Vec<Booking>,
}

/// In-memory implementation of the full store contract, for tests and local
/// development without Postgres.
///
/// One mutex guards all state, so the reserve path's check-and-increment is
/// atomic the same way the Postgres conditional UPDATE is.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_experience(&self, experience: Experience) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .experiences
            .insert(experience.id, experience);
    }

    pub fn insert_slot(&self, slot: Slot) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .slots
            .insert(slot.id, slot);
    }

    pub fn insert_promo(&self, promo: PromoCode) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .promos
            .insert(promo.code.to_lowercase(), promo);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend(anyhow!("store mutex poisoned")))
    }
}

#[async_trait]
impl ExperienceRepository for MemoryStore {
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        let inner = self.lock()?;
        let mut all: Vec<Experience> = inner.experiences.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get_experience(&self, id: Uuid) -> Result<Option<Experience>, StoreError> {
        Ok(self.lock()?.experiences.get(&id).cloned())
    }

    async fn list_upcoming_slots(
        &self,
        experience_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Slot>, StoreError> {
        let inner = self.lock()?;
        let mut slots: Vec<Slot> = inner
            .slots
            .values()
            .filter(|s| s.experience_id == experience_id && s.date >= from)
            .cloned()
            .collect();
        slots.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(slots)
    }
}

#[async_trait]
impl SlotRepository for MemoryStore {
    async fn get_slot(&self, id: Uuid) -> Result<Option<Slot>, StoreError> {
        Ok(self.lock()?.slots.get(&id).cloned())
    }

    async fn reserve(&self, id: Uuid, num_guests: i32) -> Result<Slot, StoreError> {
        // check and increment under one guard; see the trait contract
        let mut inner = self.lock()?;
        let slot = inner.slots.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Err(roam_catalog::AvailabilityError::CapacityExceeded {
            requested,
            remaining,
        }) = slot.check_admission(num_guests)
        {
            return Err(StoreError::CapacityExceeded {
                requested,
                remaining,
            });
        }

        slot.booked += num_guests;
        Ok(slot.clone())
    }

    async fn release(&self, id: Uuid, num_guests: i32) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let slot = inner.slots.get_mut(&id).ok_or(StoreError::NotFound)?;
        slot.booked = (slot.booked - num_guests).max(0);
        Ok(())
    }
}

#[async_trait]
impl PromoRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, StoreError> {
        Ok(self.lock()?.promos.get(&code.to_lowercase()).cloned())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner
            .bookings
            .iter()
            .any(|b| b.booking_reference == booking.booking_reference)
        {
            return Err(StoreError::DuplicateReference);
        }
        inner.bookings.push(booking.clone());
        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .lock()?
            .bookings
            .iter()
            .find(|b| b.booking_reference == reference)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, Utc};
    use roam_catalog::DiscountType;
    use roam_core::BookingStatus;
    use std::sync::Arc;

    fn slot(capacity: i32, booked: i32, date: NaiveDate) -> Slot {
        Slot {
            id: Uuid::new_v4(),
            experience_id: Uuid::new_v4(),
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            capacity,
            booked,
            price_modifier_cents: None,
        }
    }

    #[tokio::test]
    async fn test_reserve_is_atomic_under_contention() {
        let store = Arc::new(MemoryStore::new());
        let s = slot(5, 0, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        let slot_id = s.id;
        store.insert_slot(s);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.reserve(slot_id, 1).await },
            ));
        }

        let mut won = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                won += 1;
            }
        }

        assert_eq!(won, 5);
        let final_slot = store.get_slot(slot_id).await.unwrap().unwrap();
        assert_eq!(final_slot.booked, 5);
        assert!(final_slot.booked <= final_slot.capacity);
    }

    #[tokio::test]
    async fn test_capacity_error_reports_remaining() {
        let store = MemoryStore::new();
        let s = slot(10, 7, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        let slot_id = s.id;
        store.insert_slot(s);

        match store.reserve(slot_id, 4).await {
            Err(StoreError::CapacityExceeded {
                requested,
                remaining,
            }) => {
                assert_eq!(requested, 4);
                assert_eq!(remaining, 3);
            }
            other => panic!("expected capacity rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_release_saturates_at_zero() {
        let store = MemoryStore::new();
        let s = slot(10, 2, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        let slot_id = s.id;
        store.insert_slot(s);

        store.release(slot_id, 5).await.unwrap();
        assert_eq!(store.get_slot(slot_id).await.unwrap().unwrap().booked, 0);
    }

    #[tokio::test]
    async fn test_promo_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        store.insert_promo(PromoCode {
            id: Uuid::new_v4(),
            code: "SUMMER25".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 25,
            min_amount_cents: None,
            max_discount_cents: None,
            valid_from: Utc::now() - Duration::days(1),
            valid_until: Utc::now() + Duration::days(1),
            is_active: true,
        });

        let found = store.find_by_code("summer25").await.unwrap();
        assert_eq!(found.map(|p| p.code), Some("SUMMER25".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_reference_rejected() {
        let store = MemoryStore::new();
        let booking = Booking {
            id: Uuid::new_v4(),
            experience_id: Uuid::new_v4(),
            slot_id: Uuid::new_v4(),
            customer_name: "Sam Reyes".to_string(),
            customer_email: "sam@example.com".to_string(),
            customer_phone: "+1 555 0100".to_string(),
            num_guests: 2,
            base_amount_cents: 9000,
            discount_amount_cents: 0,
            final_amount_cents: 9000,
            promo_code: None,
            status: BookingStatus::Confirmed,
            booking_reference: "BKAAAA1111".to_string(),
            created_at: Utc::now(),
        };

        store.insert(&booking).await.unwrap();

        let mut clash = booking.clone();
        clash.id = Uuid::new_v4();
        assert!(matches!(
            store.insert(&clash).await,
            Err(StoreError::DuplicateReference)
        ));
    }

    #[tokio::test]
    async fn test_upcoming_slots_filtered_and_ordered() {
        let store = MemoryStore::new();
        let experience_id = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();

        let mut past = slot(10, 0, today - Duration::days(3));
        past.experience_id = experience_id;
        let mut later = slot(10, 0, today + Duration::days(5));
        later.experience_id = experience_id;
        let mut sooner = slot(10, 0, today + Duration::days(1));
        sooner.experience_id = experience_id;

        let later_id = later.id;
        let sooner_id = sooner.id;
        store.insert_slot(past);
        store.insert_slot(later);
        store.insert_slot(sooner);

        let upcoming = store.list_upcoming_slots(experience_id, today).await.unwrap();
        let ids: Vec<Uuid> = upcoming.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![sooner_id, later_id]);
    }
}
