//! platereg CLI Client
//!
//! Command-line interface for interacting with a platereg server.

use std::net::TcpStream;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use platereg::index::Traversal;
use platereg::protocol::{read_response, write_command, Command, Response, Status};
use platereg::{Result, Vehicle};

/// platereg CLI
#[derive(Parser, Debug)]
#[command(name = "platereg-cli")]
#[command(about = "CLI for the platereg vehicle registry")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7474")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new vehicle
    Create {
        /// License plate (unique)
        plate: String,
        brand: String,
        color: String,
        model: String,
        price: f64,
    },

    /// Get a vehicle by plate
    Get {
        /// The plate to look up
        plate: String,
    },

    /// List all vehicles in ascending plate order
    List,

    /// Replace the payload fields of an existing vehicle
    Update {
        /// The plate of the vehicle to update (cannot change)
        plate: String,
        brand: String,
        color: String,
        model: String,
        price: f64,
    },

    /// Delete a vehicle by plate
    Delete {
        /// The plate to delete
        plate: String,
    },

    /// List all vehicles in a given traversal order
    Traverse {
        /// Traversal order
        #[arg(value_enum, default_value = "inorder")]
        order: Order,
    },

    /// Ping the server
    Ping,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    Inorder,
    Preorder,
    Postorder,
}

impl From<Order> for Traversal {
    fn from(order: Order) -> Self {
        match order {
            Order::Inorder => Traversal::Inorder,
            Order::Preorder => Traversal::Preorder,
            Order::Postorder => Traversal::Postorder,
        }
    }
}

fn main() {
    let args = Args::parse();

    let command = build_command(args.command);

    match send(&args.server, &command) {
        Ok(response) => print_response(&command, response),
        Err(e) => {
            eprintln!("error: {}", e);
            exit(1);
        }
    }
}

/// Translate a CLI subcommand into a wire command
fn build_command(command: Commands) -> Command {
    match command {
        Commands::Create {
            plate,
            brand,
            color,
            model,
            price,
        } => Command::Create {
            vehicle: Vehicle::new(plate, brand, color, model, price),
        },
        Commands::Get { plate } => Command::Get { plate },
        Commands::List => Command::List,
        Commands::Update {
            plate,
            brand,
            color,
            model,
            price,
        } => Command::Update {
            plate: plate.clone(),
            vehicle: Vehicle::new(plate, brand, color, model, price),
        },
        Commands::Delete { plate } => Command::Delete { plate },
        Commands::Traverse { order } => Command::Traverse {
            order: order.into(),
        },
        Commands::Ping => Command::Ping,
    }
}

/// Send a command and read back the response
fn send(server: &str, command: &Command) -> Result<Response> {
    let mut stream = TcpStream::connect(server)?;
    write_command(&mut stream, command)?;
    read_response(&mut stream)
}

/// Print a response in a form that matches the command that produced it
fn print_response(command: &Command, response: Response) {
    match response.status {
        Status::Ok => match command {
            Command::Get { .. } => print_vehicle_payload(response.payload),
            Command::List | Command::Traverse { .. } => print_listing_payload(response.payload),
            Command::Ping => {
                let pong = response
                    .payload
                    .map(|p| String::from_utf8_lossy(&p).into_owned())
                    .unwrap_or_default();
                println!("{}", pong);
            }
            Command::Create { .. } => println!("created"),
            Command::Update { .. } => println!("updated"),
            Command::Delete { .. } => println!("deleted"),
        },
        status => {
            let message = response
                .payload
                .map(|p| String::from_utf8_lossy(&p).into_owned())
                .unwrap_or_default();
            eprintln!("{:?}: {}", status, message);
            exit(1);
        }
    }
}

fn print_vehicle_payload(payload: Option<Vec<u8>>) {
    match payload.as_deref().map(bincode::deserialize::<Vehicle>) {
        Some(Ok(vehicle)) => print_vehicle(&vehicle),
        _ => {
            eprintln!("error: malformed response payload");
            exit(1);
        }
    }
}

fn print_listing_payload(payload: Option<Vec<u8>>) {
    match payload.as_deref().map(bincode::deserialize::<Vec<Vehicle>>) {
        Some(Ok(vehicles)) => {
            println!("{} vehicle(s)", vehicles.len());
            for vehicle in &vehicles {
                print_vehicle(vehicle);
            }
        }
        _ => {
            eprintln!("error: malformed response payload");
            exit(1);
        }
    }
}

fn print_vehicle(vehicle: &Vehicle) {
    println!(
        "{}  {} {} ({}) - {}",
        vehicle.plate, vehicle.brand, vehicle.model, vehicle.color, vehicle.price
    );
}
