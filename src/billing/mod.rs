//! Subscription billing engine: calendar arithmetic, due-date projection,
//! calendar aggregation and payment advancement.

pub mod calendar;
pub mod cycle;
pub mod date_math;
pub mod payment;
pub mod period;
pub mod projector;
pub mod subscription;

pub use calendar::{CalendarAggregator, SubscriptionCalendar, TotalDisplay};
pub use cycle::BillingCycle;
pub use payment::PaymentAdvancer;
pub use period::{DateWindow, Period, PeriodTotal};
pub use projector::{
    BillingProjector, Occurrence, DEFAULT_PROJECTION_MONTHS, MAX_PROJECTION_MONTHS,
};
pub use subscription::Subscription;
