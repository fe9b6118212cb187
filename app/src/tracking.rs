use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePosition {
    pub id: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingSnapshot {
    pub vehicles: Vec<VehiclePosition>,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

const MOCK_VEHICLES: [VehiclePosition; 2] = [
    VehiclePosition {
        id: "EQB-1",
        lat: 52.520008,
        lng: 13.404954,
        status: "en_route",
    },
    VehiclePosition {
        id: "SPRINTER-1",
        lat: 52.516275,
        lng: 13.377704,
        status: "idle",
    },
];

pub fn mock_snapshot() -> TrackingSnapshot {
    TrackingSnapshot {
        vehicles: MOCK_VEHICLES.to_vec(),
        ts: Utc::now().timestamp_millis(),
    }
}
