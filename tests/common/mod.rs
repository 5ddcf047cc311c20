#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use event_booking::api::routes::{admin_routes, public_routes};
use event_booking::application::services::{
    BookingService, CatalogService, CertificateService, DraftService, QuoteService,
};
use event_booking::domain::entities::{
    AddOn, AddOnVariant, BookingStatus, BookingSummary, BundleDiscount, CertificateFilter,
    CertificateListItem, CertificateStatus, City, DiscountType, Event, GameSlot, NewBooking,
    PendingBooking, PendingBookingReceipt, PromoCode, PromoValidation,
};
use event_booking::domain::gateways::{
    BookingGateway, CatalogGateway, CertificateGateway, ManualPayment, PaymentGateway,
    PaymentRequest, PromoGateway,
};
use event_booking::domain::notification::BookingNotification;
use event_booking::domain::rules::AgeBoundUnit;
use event_booking::error::AppError;
use event_booking::infrastructure::drafts::MemoryDraftStore;
use event_booking::state::AppState;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

pub const EVENT_ID: i64 = 7;
pub const TRANSACTION_ID: &str = "TXN_1760780000000_a1B2c3";
pub const ADMIN_BOOKING_ID: i64 = 101;

/// Born 2025-09-01: 15 months on the event date.
pub fn toddler_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

/// Born 2023-06-10: 41 months on the event date.
pub fn preschooler_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 10).unwrap()
}

pub fn event_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 5).unwrap()
}

fn slot(id: i64, game_id: i64, title: &str, ages: (Option<i32>, Option<i32>)) -> GameSlot {
    GameSlot {
        id,
        game_id,
        game_title: title.to_string(),
        start_time: "10:00".to_string(),
        end_time: "10:30".to_string(),
        capacity: 10,
        booked_count: 2,
        price: None,
        listed_price: None,
        min_age_months: ages.0,
        max_age_months: ages.1,
    }
}

/// Event 7 with five slots:
///
/// - 31, 32: game 10 "Baby Crawling", 6-18 months, 1800
/// - 45: game 20 "Running Race", 24-48 months, listed price 1500
/// - 50: game 30 "Hurdle Toddle", no age bounds, full
/// - 60: game 40 "Ball Throw", no age bounds, 500
pub fn sample_event() -> Event {
    let mut crawl_morning = slot(31, 10, "Baby Crawling", (Some(6), Some(18)));
    crawl_morning.price = Some(1800.0);
    let mut crawl_noon = slot(32, 10, "Baby Crawling", (Some(6), Some(18)));
    crawl_noon.price = Some(1800.0);
    crawl_noon.start_time = "12:00".to_string();
    let mut race = slot(45, 20, "Running Race", (Some(24), Some(48)));
    race.listed_price = Some(1500.0);
    let mut hurdle = slot(50, 30, "Hurdle Toddle", (None, None));
    hurdle.price = Some(999.0);
    hurdle.booked_count = hurdle.capacity;
    let mut throw = slot(60, 40, "Ball Throw", (None, None));
    throw.price = Some(500.0);

    Event {
        id: EVENT_ID,
        title: "Baby Olympics".to_string(),
        description: "Games for little ones".to_string(),
        date: event_date(),
        venue: "Kanteerava Stadium".to_string(),
        city: "Bengaluru".to_string(),
        city_id: Some(1),
        slots: vec![crawl_morning, crawl_noon, race, hurdle, throw],
    }
}

/// T-shirt 300 (variant 9 "Large" at 350, 10% off from 3), medal 100.
pub fn sample_add_ons() -> Vec<AddOn> {
    vec![
        AddOn {
            id: 3,
            name: "T-Shirt".to_string(),
            price: 300.0,
            variants: vec![AddOnVariant {
                id: 9,
                name: "Large".to_string(),
                price: Some(350.0),
                price_modifier: None,
            }],
            bundle_discount: Some(BundleDiscount {
                min_quantity: 3,
                discount_percent: 10.0,
            }),
        },
        AddOn {
            id: 4,
            name: "Medal".to_string(),
            price: 100.0,
            variants: vec![],
            bundle_discount: None,
        },
    ]
}

pub fn sample_promo_codes() -> Vec<PromoCode> {
    let far_future = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
    let base = PromoCode {
        id: 1,
        code: "WELCOME10".to_string(),
        discount_type: DiscountType::Percentage,
        value: 10.0,
        valid_from: None,
        valid_to: far_future,
        is_active: true,
        minimum_purchase: 0.0,
        maximum_discount: None,
        event_ids: vec![],
        game_ids: vec![],
        usage_limit: None,
        usage_count: 0,
    };

    vec![
        base.clone(),
        PromoCode {
            id: 2,
            code: "RACEDAY".to_string(),
            game_ids: vec![20],
            ..base.clone()
        },
        PromoCode {
            id: 3,
            code: "OLDSALE".to_string(),
            valid_to: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            ..base
        },
    ]
}

pub fn summary(id: i64, reference: &str, parent: &str, status: &str, amount: f64) -> BookingSummary {
    BookingSummary {
        id,
        reference: reference.to_string(),
        parent_name: parent.to_string(),
        child_name: format!("Child of {}", parent),
        event_title: "Baby Olympics".to_string(),
        event_date: Some(event_date()),
        city: "Bengaluru".to_string(),
        status: status.to_string(),
        payment_status: "completed".to_string(),
        total_amount: amount,
        created_at: Some(
            DateTime::parse_from_rfc3339("2026-10-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        ),
    }
}

pub fn sample_bookings() -> Vec<BookingSummary> {
    vec![
        summary(1, "PPT261001001", "Ravi Kumar", "Confirmed", 1800.0),
        summary(2, "MAN261002002", "Meena Iyer", "Pending", 2100.0),
        summary(3, "PPT261003003", "Arjun Rao", "Cancelled", 1500.0),
        summary(4, "MAN261004004", "Kavya Reddy", "Confirmed", 999.0),
    ]
}

pub struct FakeCatalog {
    pub fail: bool,
}

fn upstream_down() -> AppError {
    AppError::upstream("Catalog service unavailable", json!({ "status": 503 }))
}

#[async_trait]
impl CatalogGateway for FakeCatalog {
    async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        if self.fail {
            return Err(upstream_down());
        }
        Ok(vec![City {
            id: 1,
            name: "Bengaluru".to_string(),
            state: Some("Karnataka".to_string()),
            venue_count: Some(2),
        }])
    }

    async fn events_for_city(&self, city_id: i64) -> Result<Vec<Event>, AppError> {
        if self.fail {
            return Err(upstream_down());
        }
        if city_id == 1 {
            Ok(vec![sample_event()])
        } else {
            Ok(vec![])
        }
    }

    async fn get_event(&self, event_id: i64) -> Result<Option<Event>, AppError> {
        if self.fail {
            return Err(upstream_down());
        }
        Ok((event_id == EVENT_ID).then(sample_event))
    }

    async fn list_add_ons(&self) -> Result<Vec<AddOn>, AppError> {
        if self.fail {
            return Err(upstream_down());
        }
        Ok(sample_add_ons())
    }

    async fn list_promo_codes(&self) -> Result<Vec<PromoCode>, AppError> {
        if self.fail {
            return Err(upstream_down());
        }
        Ok(sample_promo_codes())
    }
}

/// Accepts `WELCOME10` for 10% of the subtotal, refuses everything else.
pub struct FakePromos;

#[async_trait]
impl PromoGateway for FakePromos {
    async fn validate_preview(
        &self,
        code: &str,
        _event_id: i64,
        _game_ids: Vec<i64>,
        subtotal: f64,
    ) -> Result<PromoValidation, AppError> {
        if code.eq_ignore_ascii_case("WELCOME10") {
            Ok(PromoValidation {
                is_valid: true,
                discount_amount: subtotal * 0.1,
                message: Some("10% off".to_string()),
            })
        } else {
            Ok(PromoValidation::rejected("Invalid promo code"))
        }
    }
}

/// Records what was sent upstream.
#[derive(Default)]
pub struct FakeBookings {
    pub rows: Mutex<Vec<BookingSummary>>,
    pub pending: Mutex<Vec<PendingBooking>>,
    pub created: Mutex<Vec<NewBooking>>,
    pub status_updates: Mutex<Vec<(i64, BookingStatus)>>,
    /// Booking ids whose status update fails upstream.
    pub failing_ids: Vec<i64>,
}

#[async_trait]
impl BookingGateway for FakeBookings {
    async fn create_pending(
        &self,
        booking: PendingBooking,
    ) -> Result<PendingBookingReceipt, AppError> {
        self.pending.lock().unwrap().push(booking);
        Ok(PendingBookingReceipt {
            transaction_id: TRANSACTION_ID.to_string(),
            expires_at: None,
        })
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<i64, AppError> {
        self.created.lock().unwrap().push(booking);
        Ok(ADMIN_BOOKING_ID)
    }

    async fn list_bookings(&self) -> Result<Vec<BookingSummary>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<(), AppError> {
        if self.failing_ids.contains(&booking_id) {
            return Err(AppError::upstream(
                "Booking service rejected the update",
                json!({ "status": 500 }),
            ));
        }
        self.status_updates.lock().unwrap().push((booking_id, status));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePayments {
    pub initiated: Mutex<Vec<PaymentRequest>>,
    pub recorded: Mutex<Vec<ManualPayment>>,
}

#[async_trait]
impl PaymentGateway for FakePayments {
    async fn initiate(&self, request: PaymentRequest) -> Result<String, AppError> {
        let url = format!("https://pay.example.com/redirect/{}", request.transaction_id);
        self.initiated.lock().unwrap().push(request);
        Ok(url)
    }

    async fn record_manual(&self, payment: ManualPayment) -> Result<(), AppError> {
        self.recorded.lock().unwrap().push(payment);
        Ok(())
    }
}

fn certificate(
    id: i64,
    event_id: i64,
    child: &str,
    parent: &str,
    status: CertificateStatus,
) -> CertificateListItem {
    CertificateListItem {
        id,
        certificate_number: Some(format!("CERT-2026-{:04}", id)),
        event_id: Some(event_id),
        event_title: if event_id == EVENT_ID {
            "Baby Olympics".to_string()
        } else {
            "Toddler Sprint".to_string()
        },
        event_date: Some(event_date()),
        venue_name: "Gachibowli Stadium".to_string(),
        city_name: "Hyderabad".to_string(),
        child_name: child.to_string(),
        game_name: "Baby Crawling".to_string(),
        parent_name: parent.to_string(),
        parent_email: format!("{}@example.com", parent.trim_start_matches('=').to_lowercase()),
        status,
        generated_at: Some(Utc.with_ymd_and_hms(2026, 12, 6, 10, id as u32, 0).unwrap()),
    }
}

pub fn sample_certificates() -> Vec<CertificateListItem> {
    vec![
        certificate(1, EVENT_ID, "Asha", "Ravi", CertificateStatus::Sent),
        certificate(2, EVENT_ID, "Kabir", "Neha", CertificateStatus::Generated),
        certificate(3, 8, "Meera", "Suresh", CertificateStatus::Sent),
        certificate(4, EVENT_ID, "Ishaan", "=Anil", CertificateStatus::Failed),
        certificate(5, EVENT_ID, "Diya", "Priya", CertificateStatus::Sent),
    ]
}

/// Applies the scope the way the certificate service does and records it.
#[derive(Default)]
pub struct FakeCertificates {
    pub fail: bool,
    pub scopes: Mutex<Vec<CertificateFilter>>,
}

#[async_trait]
impl CertificateGateway for FakeCertificates {
    async fn list_certificates(
        &self,
        filter: CertificateFilter,
    ) -> Result<Vec<CertificateListItem>, AppError> {
        self.scopes.lock().unwrap().push(filter);
        if self.fail {
            return Err(AppError::upstream(
                "Certificate service unavailable",
                json!({ "status": 503 }),
            ));
        }
        Ok(sample_certificates()
            .into_iter()
            .filter(|c| filter.event_id.is_none_or(|id| c.event_id == Some(id)))
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .collect())
    }
}

/// Handles on the fakes behind a test state.
pub struct TestContext {
    pub state: AppState,
    pub bookings: Arc<FakeBookings>,
    pub payments: Arc<FakePayments>,
    pub certificates: Arc<FakeCertificates>,
    pub notifications: mpsc::Receiver<BookingNotification>,
}

pub fn create_test_context() -> TestContext {
    build_context(
        FakeCatalog { fail: false },
        FakeBookings::default(),
        FakeCertificates::default(),
    )
}

pub fn create_failing_catalog_context() -> TestContext {
    build_context(
        FakeCatalog { fail: true },
        FakeBookings::default(),
        FakeCertificates::default(),
    )
}

pub fn create_context_with_bookings(bookings: FakeBookings) -> TestContext {
    build_context(FakeCatalog { fail: false }, bookings, FakeCertificates::default())
}

pub fn create_failing_certificates_context() -> TestContext {
    build_context(
        FakeCatalog { fail: false },
        FakeBookings::default(),
        FakeCertificates {
            fail: true,
            ..Default::default()
        },
    )
}

fn build_context(
    catalog: FakeCatalog,
    bookings: FakeBookings,
    certificates: FakeCertificates,
) -> TestContext {
    let catalog: Arc<dyn CatalogGateway> = Arc::new(catalog);
    let bookings = Arc::new(bookings);
    let payments = Arc::new(FakePayments::default());
    let (tx, rx) = mpsc::channel(100);

    let quote_service = Arc::new(QuoteService::new(
        catalog.clone(),
        Arc::new(FakePromos),
        AgeBoundUnit::Months,
    ));
    let booking_service = Arc::new(BookingService::new(
        quote_service.clone(),
        bookings.clone(),
        payments.clone(),
        tx,
    ));
    let catalog_service = Arc::new(CatalogService::new(catalog, AgeBoundUnit::Months));
    let draft_service = Arc::new(DraftService::new(
        Arc::new(MemoryDraftStore::new()),
        Duration::from_secs(3600),
    ));

    let certificates = Arc::new(certificates);
    let certificate_service = Arc::new(CertificateService::new(certificates.clone()));

    TestContext {
        state: AppState::new(
            catalog_service,
            quote_service,
            booking_service,
            draft_service,
            certificate_service,
        ),
        bookings,
        payments,
        certificates,
        notifications: rx,
    }
}

pub fn public_app(state: AppState) -> Router {
    Router::new().nest("/api", public_routes()).with_state(state)
}

pub fn admin_app(state: AppState) -> Router {
    Router::new().nest("/admin", admin_routes()).with_state(state)
}

pub fn parent_json() -> serde_json::Value {
    json!({
        "full_name": "Ravi Kumar",
        "email": "ravi@example.com",
        "phone": "9876543210"
    })
}

pub fn child_json(dob: NaiveDate) -> serde_json::Value {
    json!({
        "full_name": "Asha Kumar",
        "date_of_birth": dob.to_string(),
        "gender": "female"
    })
}
