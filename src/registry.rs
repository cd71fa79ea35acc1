//! Registry Module
//!
//! The context object that coordinates the plate index and the record store.
//!
//! ## Responsibilities
//! - Seed the index from the store at startup
//! - Route commands to index operations
//! - Mirror each successful index mutation into the store
//! - Translate absence/conflict into typed error signals
//!
//! Replaces the process-wide singleton tree of the original design with an
//! explicit value constructed once at startup and shared behind `Arc`.

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::index::{PlateIndex, Traversal};
use crate::model::Vehicle;
use crate::protocol::Command;
use crate::store::VehicleStore;

/// The vehicle registry
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (create/update/delete): take the index write lock for the
///   full mutation, index first and store second in that order. If the store
///   step fails the two can diverge; there is no rollback (accepted gap,
///   matching the original eventual-consistency behavior).
/// - **Reads** (get/list/traverse): shared index read lock held for the
///   whole tree walk, store untouched.
pub struct Registry {
    /// Registry configuration
    config: Config,

    /// Ordered index over all records (shared readers, exclusive writer)
    index: RwLock<PlateIndex>,

    /// Flat-file record store (exclusive access per mutation)
    store: Mutex<VehicleStore>,
}

impl Registry {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const STORE_FILENAME: &'static str = "vehicles.csv";

    /// Open or create a registry with the given config
    ///
    /// On startup:
    /// 1. Open/create the store file under the data directory
    /// 2. Load every persisted record
    /// 3. Seed the index via repeated insert (duplicate plates in the file
    ///    are dropped, first occurrence wins)
    pub fn open(config: Config) -> Result<Self> {
        let store_path = config.data_dir.join(Self::STORE_FILENAME);
        let store = VehicleStore::open(&store_path)?;

        let mut index = PlateIndex::new();
        let records = store.load_all()?;
        let loaded = records.len();

        for vehicle in records {
            if !index.insert(vehicle.clone()) {
                tracing::warn!("duplicate plate '{}' in store, keeping first occurrence", vehicle.plate);
            }
        }

        tracing::debug!("registry seeded with {} of {} persisted records", index.len(), loaded);

        Ok(Self {
            config,
            index: RwLock::new(index),
            store: Mutex::new(store),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.data_dir = path.to_path_buf();
        Self::open(config)
    }

    /// Execute a command
    ///
    /// Routes commands to the appropriate handlers and serializes any
    /// result payload for the wire.
    pub fn execute(&self, command: Command) -> Result<Option<Vec<u8>>> {
        match command {
            Command::Create { vehicle } => {
                self.create(vehicle)?;
                Ok(None)
            }
            Command::Get { plate } => {
                let vehicle = self.get(&plate)?;
                Ok(Some(encode_payload(&vehicle)?))
            }
            Command::List => {
                let vehicles = self.list();
                Ok(Some(encode_payload(&vehicles)?))
            }
            Command::Update { plate, vehicle } => {
                self.update(&plate, vehicle)?;
                Ok(None)
            }
            Command::Delete { plate } => {
                self.delete(&plate)?;
                Ok(None)
            }
            Command::Traverse { order } => {
                let vehicles = self.traverse(order);
                Ok(Some(encode_payload(&vehicles)?))
            }
            Command::Ping => Ok(Some(b"PONG".to_vec())),
        }
    }

    /// Register a new vehicle
    ///
    /// Fails with [`RegistryError::DuplicatePlate`] if the plate is taken;
    /// neither index nor store is touched in that case.
    pub fn create(&self, vehicle: Vehicle) -> Result<()> {
        let mut index = self.index.write();

        let plate = vehicle.plate.clone();
        if !index.insert(vehicle.clone()) {
            return Err(RegistryError::DuplicatePlate(plate));
        }

        // Index mutated; mirror into the store while still holding the
        // write lock so no reader observes the gap as a reorder.
        self.store.lock().append(&vehicle)?;

        tracing::debug!("created vehicle '{}'", plate);
        Ok(())
    }

    /// Look up a vehicle by plate
    pub fn get(&self, plate: &str) -> Result<Vehicle> {
        self.index
            .read()
            .search(plate)
            .cloned()
            .ok_or_else(|| RegistryError::PlateNotFound(plate.to_string()))
    }

    /// All vehicles in ascending plate order
    pub fn list(&self) -> Vec<Vehicle> {
        self.index.read().get_all()
    }

    /// Replace the payload of an existing vehicle
    ///
    /// The payload's plate must match the addressed plate: the plate is the
    /// index key and can never change, so a mismatch is rejected before the
    /// index is touched.
    pub fn update(&self, plate: &str, vehicle: Vehicle) -> Result<()> {
        if vehicle.plate != plate {
            return Err(RegistryError::PlateMismatch {
                path: plate.to_string(),
                body: vehicle.plate,
            });
        }

        let mut index = self.index.write();

        if !index.update(plate, &vehicle) {
            return Err(RegistryError::PlateNotFound(plate.to_string()));
        }

        self.store.lock().rewrite(plate, &vehicle)?;

        tracing::debug!("updated vehicle '{}'", plate);
        Ok(())
    }

    /// Remove a vehicle by plate
    pub fn delete(&self, plate: &str) -> Result<()> {
        let mut index = self.index.write();

        if !index.delete(plate) {
            return Err(RegistryError::PlateNotFound(plate.to_string()));
        }

        self.store.lock().remove(plate)?;

        tracing::debug!("deleted vehicle '{}'", plate);
        Ok(())
    }

    /// All vehicles in the requested traversal order
    pub fn traverse(&self, order: Traversal) -> Vec<Vehicle> {
        self.index.read().traverse(order)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the store file path
    pub fn store_path(&self) -> PathBuf {
        self.config.data_dir.join(Self::STORE_FILENAME)
    }

    /// Number of registered vehicles
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Whether the registry holds no vehicles
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Serialize a response payload with bincode
fn encode_payload<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| RegistryError::Serialization(e.to_string()))
}
