pub mod events;
pub mod port;
pub mod prediction;
pub mod shipment;

pub use events::{CongestionEvent, CongestionTier, WeatherEvent};
pub use port::{haversine_nm, Port};
pub use prediction::{Prediction, RiskTier};
pub use shipment::{Shipment, ShipmentStatus};
