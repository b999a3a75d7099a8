//! CSV loader for the trimmed GTFS tables.
//!
//! Expects `routes.csv`, `trips.csv`, `stops.csv` and `stop_times.csv` in one
//! directory, each with a header row. Columns other than the ones listed on
//! the row types are ignored.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::identifiers::*;
use crate::models::types::*;
use crate::provider::static_provider::*;

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: String,
    route_short_name: String,
}

#[derive(Debug, Deserialize)]
struct TripRow {
    trip_id: String,
    route_id: String,
    trip_headsign: String,
    direction_id: u8,
}

#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
}

#[derive(Debug, Deserialize)]
struct StopTimeRow {
    trip_id: String,
    stop_id: String,
    arrival_time: String,
    stop_sequence: u32,
}

fn read_rows<T, R>(reader: R) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .map(|row| row.map_err(AnnouncerError::from))
        .collect()
}

/// Build a provider from the four tables
pub fn from_readers<R: Read>(routes: R, trips: R, stops: R, stop_times: R) -> Result<StaticScheduleProvider> {
    let routes = read_rows::<RouteRow, _>(routes)?
        .into_iter()
        .map(|r| RouteRecord {
            route_id: RouteIdentifier::new(r.route_id),
            number: RouteNumber::new(r.route_short_name),
        })
        .collect();

    let trips = read_rows::<TripRow, _>(trips)?
        .into_iter()
        .map(|t| {
            let direction = DirectionId::from_gtfs(t.direction_id).ok_or_else(|| {
                AnnouncerError::InvalidData(format!(
                    "Trip {}: unknown direction_id {}",
                    t.trip_id, t.direction_id
                ))
            })?;
            Ok(TripRecord {
                trip_id: TripIdentifier::new(t.trip_id),
                route_id: RouteIdentifier::new(t.route_id),
                headsign: t.trip_headsign.into(),
                direction,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let stops = read_rows::<StopRow, _>(stops)?
        .into_iter()
        .map(|s| StopRecord {
            stop_id: StopIdentifier::new(s.stop_id),
            name: s.stop_name.into(),
            coordinates: Coordinates::new(s.stop_lat, s.stop_lon),
        })
        .collect::<Vec<_>>();

    let stop_times = read_rows::<StopTimeRow, _>(stop_times)?
        .into_iter()
        .map(|t| {
            Ok(StopTimeRecord {
                arrival: parse_service_time(&t.arrival_time)?,
                trip_id: TripIdentifier::new(t.trip_id),
                stop_id: StopIdentifier::new(t.stop_id),
                stop_sequence: t.stop_sequence,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        trips = trips.len(),
        stops = stops.len(),
        stop_times = stop_times.len(),
        "parsed schedule tables"
    );

    Ok(StaticScheduleProvider::from_data(routes, trips, stops, stop_times))
}

/// Load the tables from `dir`
pub fn load_directory(dir: impl AsRef<Path>) -> Result<StaticScheduleProvider> {
    let dir = dir.as_ref();
    let open = |table: &str| std::fs::File::open(dir.join(format!("{}.csv", table)));

    let provider = from_readers(open("routes")?, open("trips")?, open("stops")?, open("stop_times")?)?;
    info!(
        dir = %dir.display(),
        stops = provider.stop_count(),
        trips = provider.trip_count(),
        "loaded schedule"
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::ScheduleProvider;
    use chrono::TimeDelta;

    const ROUTES: &str = ",route_id,route_short_name\n0,200-1,200\n1,66-4,66\n";
    const TRIPS: &str = "\
,trip_id,route_id,trip_headsign,direction_id
0,t1,200-1,Banh Mi Shop,0
1,t2,200-1,Brisbane Street,1
";
    const STOPS: &str = "\
,stop_id,stop_name,stop_lat,stop_lon
0,1,Brisbane Street,45.6,123.4
1,2,Marble Mountains,45.8,124.0
2,3,World's Best Banh Mi Shop,46.3,123.4
";
    const STOP_TIMES: &str = "\
,trip_id,stop_id,arrival_time,stop_sequence
0,t1,1,23:50:00,1
1,t1,2,24:00:00,2
2,t1,3, 24:10:30,3
3,t2,3,7:00:00,1
4,t2,1,7:20:00,2
";

    fn provider() -> StaticScheduleProvider {
        from_readers(ROUTES.as_bytes(), TRIPS.as_bytes(), STOPS.as_bytes(), STOP_TIMES.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_tables() {
        let provider = provider();
        assert_eq!(provider.stop_count(), 3);
        assert_eq!(provider.trip_count(), 2);

        let route = provider
            .get_stops(&RouteNumber::new("200"), DirectionId::Outbound, None, None)
            .unwrap();
        let offsets: Vec<TimeDelta> = route.stops().iter().map(|s| s.time).collect();
        assert_eq!(
            offsets,
            [TimeDelta::zero(), TimeDelta::minutes(10), TimeDelta::seconds(20 * 60 + 30)]
        );
    }

    #[test]
    fn test_direction_from_table() {
        let provider = provider();
        assert_eq!(
            provider.direction_for(&RouteNumber::new("200"), "Brisbane Street").unwrap(),
            DirectionId::Inbound
        );
    }

    #[test]
    fn test_route_without_trips() {
        let provider = provider();
        assert!(matches!(
            provider.get_stops(&RouteNumber::new("66"), DirectionId::Outbound, None, None),
            Err(AnnouncerError::NoTrips { .. })
        ));
    }

    #[test]
    fn test_bad_rows() {
        let bad_direction = ",trip_id,route_id,trip_headsign,direction_id\n0,t1,200-1,X,7\n";
        assert!(matches!(
            from_readers(ROUTES.as_bytes(), bad_direction.as_bytes(), STOPS.as_bytes(), STOP_TIMES.as_bytes()),
            Err(AnnouncerError::InvalidData(_))
        ));

        let bad_time = ",trip_id,stop_id,arrival_time,stop_sequence\n0,t1,1,noon,1\n";
        assert!(matches!(
            from_readers(ROUTES.as_bytes(), TRIPS.as_bytes(), STOPS.as_bytes(), bad_time.as_bytes()),
            Err(AnnouncerError::InvalidData(_))
        ));

        let bad_lat = ",stop_id,stop_name,stop_lat,stop_lon\n0,1,A,north,123.4\n";
        assert!(matches!(
            from_readers(ROUTES.as_bytes(), TRIPS.as_bytes(), bad_lat.as_bytes(), STOP_TIMES.as_bytes()),
            Err(AnnouncerError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        assert!(matches!(
            load_directory("/definitely/not/a/schedule"),
            Err(AnnouncerError::Io(_))
        ));
    }
}
