//! Interactive console surface.
//!
//! A numbered menu over line-based stdin, sharing one loop with the
//! scheduler: every iteration first checks whether the refresh + alert cycle
//! is due, then renders one screen. All prompts re-ask on invalid input.

use crate::api::geocoding::{GeocodeResult, GeocodingClient};
use crate::config::Config;
use crate::db::models::UserLocation;
use crate::db::sqlite::Store;
use crate::error::DustwatchError;
use crate::geo::Grade;
use crate::service::alert::AlertJob;
use crate::service::matcher;
use crate::service::notifier::ConsoleNotifier;
use crate::service::refresh::RefreshJob;
use crate::service::scheduler::{run_cycle, Scheduler};
use std::io::Write as _;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

pub struct App {
    store: Store,
    geocoder: GeocodingClient,
    refresh: RefreshJob,
    alert: AlertJob,
    notifier: ConsoleNotifier,
    scheduler: Scheduler,
    radius_km: f64,
    input: Lines<BufReader<Stdin>>,
}

impl App {
    pub fn new(
        store: Store,
        geocoder: GeocodingClient,
        refresh: RefreshJob,
        alert: AlertJob,
        config: &Config,
    ) -> Self {
        Self {
            store,
            geocoder,
            refresh,
            alert,
            notifier: ConsoleNotifier::new(),
            scheduler: Scheduler::new(Duration::from_secs(config.refresh_interval_secs)),
            radius_km: config.nearby_radius_km,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Runs one refresh + alert cycle up front, then the menu loop until the
    /// operator quits or stdin closes.
    pub async fn run(mut self) -> Result<(), DustwatchError> {
        println!("Updating air quality data, please wait...");
        run_cycle(&self.refresh, &self.alert, &self.notifier).await;
        self.scheduler.mark_run();

        loop {
            if self.scheduler.is_due() {
                run_cycle(&self.refresh, &self.alert, &self.notifier).await;
                self.scheduler.mark_run();
            }
            if !self.main_menu().await? {
                break;
            }
        }
        Ok(())
    }

    /// Prints the prompt without a trailing newline and reads one line.
    /// `None` means stdin reached EOF.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>, DustwatchError> {
        print!("{text}");
        std::io::stdout().flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    async fn pause(&mut self) -> Result<(), DustwatchError> {
        let _ = self.prompt("Press Enter to continue...").await?;
        Ok(())
    }

    /// One screen of the top-level menu. Returns `false` when the loop
    /// should stop.
    async fn main_menu(&mut self) -> Result<bool, DustwatchError> {
        println!();
        println!("1. Saved locations");
        println!("2. Add a location");
        println!("3. Air quality near an address");
        println!("q. Quit");

        let Some(choice) = self.prompt("\nSelect an option: ").await? else {
            return Ok(false);
        };
        match choice.as_str() {
            "1" => self.manage_locations().await?,
            "2" => self.edit_location(None).await?,
            "3" => self.nearest_air_quality().await?,
            "q" | "Q" => return Ok(false),
            _ => {
                println!("Invalid selection.");
                self.pause().await?;
            }
        }
        Ok(true)
    }

    async fn manage_locations(&mut self) -> Result<(), DustwatchError> {
        let locations = self.store.user_locations().await?;
        if locations.is_empty() {
            println!("No saved locations.");
            return self.pause().await;
        }

        println!();
        for (i, location) in locations.iter().enumerate() {
            println!(
                "{i}. {} [{}, {}]",
                location.alias, location.latitude, location.longitude
            );
        }

        let Some(input) = self.prompt("\nSelect a location: ").await? else {
            return Ok(());
        };
        let Some(location) = input.parse::<usize>().ok().and_then(|n| locations.get(n)) else {
            println!("Invalid selection.");
            return self.pause().await;
        };
        let alias = location.alias.clone();

        println!("1. Details  2. Edit  3. Delete");
        let Some(choice) = self.prompt("Select an option: ").await? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => self.location_details(&alias).await?,
            "2" => self.edit_location(Some(alias)).await?,
            "3" => {
                self.store.delete_user_location(&alias).await?;
                println!("Deleted.");
                self.pause().await?;
            }
            _ => {
                println!("Invalid selection.");
                self.pause().await?;
            }
        }
        Ok(())
    }

    async fn location_details(&mut self, alias: &str) -> Result<(), DustwatchError> {
        let Some(location) = self.store.user_location(alias).await? else {
            println!("That location no longer exists.");
            return self.pause().await;
        };

        println!();
        println!("Alias: {}", location.alias);
        println!("Coordinates: {}, {}", location.latitude, location.longitude);

        let mut cached = self.store.nearby_cache(alias).await?;
        if cached.is_empty() {
            println!("No monitoring station within {:.0} km.", self.radius_km);
            return self.pause().await;
        }
        cached.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        let nearest = &cached[0];

        println!();
        println!("Nearest station: {}", nearest.station_name);
        println!("Distance: {:.1} km", nearest.distance_km);
        let station_name = nearest.station_name.clone();
        self.print_reading(&station_name).await?;
        self.pause().await
    }

    /// Adds a new location, or edits an existing one by re-running the same
    /// flow under its alias. Recomputes the nearby-station cache either way.
    async fn edit_location(&mut self, existing: Option<String>) -> Result<(), DustwatchError> {
        let alias = match existing {
            Some(alias) => alias,
            None => loop {
                let Some(name) = self.prompt("Name for the new location: ").await? else {
                    return Ok(());
                };
                if !name.is_empty() {
                    break name;
                }
            },
        };

        let results = loop {
            let Some(address) = self.prompt("Address: ").await? else {
                return Ok(());
            };
            match self.geocoder.forward(&address).await {
                Ok(results) if !results.is_empty() => break results,
                Ok(_) => println!("No location found for that address."),
                Err(e) => {
                    warn!(error = %e, "geocoding failed");
                    println!("Address lookup failed, try again.");
                }
            }
        };

        let picked = loop {
            println!();
            for (i, result) in results.iter().enumerate() {
                println!("{i}. {}", result.formatted_address);
            }
            let Some(input) = self.prompt("\nSelect a location: ").await? else {
                return Ok(());
            };
            match input.parse::<usize>().ok().and_then(|n| results.get(n)) {
                Some(result) => break result.clone(),
                None => println!("Invalid selection."),
            }
        };

        self.save_location(&alias, &picked).await?;
        println!("Saved.");
        self.pause().await
    }

    async fn save_location(
        &self,
        alias: &str,
        picked: &GeocodeResult,
    ) -> Result<(), DustwatchError> {
        let coords = picked.geometry.location;
        self.store
            .upsert_user_location(&UserLocation {
                alias: alias.to_string(),
                latitude: coords.lat,
                longitude: coords.lng,
            })
            .await?;

        let stations = self.store.stations().await?;
        let entries: Vec<(String, f64)> =
            matcher::nearby(&stations, coords.lat, coords.lng, self.radius_km)
                .into_iter()
                .map(|(station, dist)| (station.name.clone(), dist))
                .collect();
        self.store.replace_nearby_cache(alias, &entries).await?;
        Ok(())
    }

    async fn nearest_air_quality(&mut self) -> Result<(), DustwatchError> {
        let Some(address) = self.prompt("Enter an area or address: ").await? else {
            return Ok(());
        };

        let results = match self.geocoder.forward(&address).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "geocoding failed");
                println!("Address lookup failed.");
                return self.pause().await;
            }
        };
        let Some(first) = results.first() else {
            println!("No location found for that address.");
            return self.pause().await;
        };

        let coords = first.geometry.location;
        let stations = self.store.stations().await?;
        let Some((station, dist)) = matcher::nearest(&stations, coords.lat, coords.lng) else {
            println!("{}", DustwatchError::NoStationAvailable);
            return self.pause().await;
        };

        println!();
        println!("Station: {}", station.name);
        println!("Address: {}", station.address);
        println!("Distance: {:.1} km", dist);
        let station_name = station.name.clone();
        self.print_reading(&station_name).await?;
        self.pause().await
    }

    async fn print_reading(&mut self, station_name: &str) -> Result<(), DustwatchError> {
        match self.store.reading(station_name).await? {
            Some(reading) => match reading.khai {
                Some(khai) => {
                    println!("Integrated index: {khai}");
                    println!("Grade: {}", Grade::from_khai(khai));
                    if let Some(at) = reading.measured_at {
                        println!("Measured at: {at}");
                    }
                }
                None => println!("Integrated index: no data"),
            },
            None => println!("Integrated index: no data"),
        }
        Ok(())
    }
}
