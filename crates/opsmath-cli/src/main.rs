mod logging;
mod report;
mod scenario;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use opsmath_models::{
    Component, InventoryError, InventoryParams, QueueError, ReliabilityError, SeriesReliability,
    SingleServerQueue,
};
use opsmath_solver::{Constraint, ConstraintSystem, Objective, ProductionOptimizer, SolveError};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use report::{
    print_inventory, print_production, print_queue, print_reliability, print_scenario, InventoryReport,
    ProductionReport, QueueReport, ReliabilityReport, ScenarioReport,
};
use scenario::{ProductionScenario, Scenario, ScenarioError};

#[derive(Parser)]
#[command(name = "opsmath")]
#[command(about = "Production, inventory, queueing and reliability models for small industry", long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Log pipeline details to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the most profitable mix of two products under two resource limits
    Produce {
        /// Profit per unit of the first product
        #[arg(long, default_value_t = 750_000.0)]
        profit_x: f64,
        /// Profit per unit of the second product
        #[arg(long, default_value_t = 300_000.0)]
        profit_y: f64,
        /// First resource as name:a,b,c meaning a·x + b·y <= c
        #[arg(long, default_value = "hours:6,2,240", value_parser = parse_constraint)]
        first: Constraint,
        /// Second resource as name:a,b,c
        #[arg(long, default_value = "wood:4,1.5,120", value_parser = parse_constraint)]
        second: Constraint,
        #[arg(long, default_value = "tables")]
        x_label: String,
        #[arg(long, default_value = "chairs")]
        y_label: String,
        /// Include this many samples of the feasible region boundary
        #[arg(long)]
        frontier: Option<usize>,
        /// Tolerance for floating point comparisons
        #[arg(long, default_value_t = opsmath_solver::DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// Economic order quantity and reorder point
    Inventory {
        /// Units demanded per year
        #[arg(long, default_value_t = 1200.0)]
        demand: f64,
        /// Cost of placing one order
        #[arg(long, default_value_t = 500_000.0)]
        order_cost: f64,
        /// Cost of holding one unit for a year
        #[arg(long, default_value_t = 25_000.0)]
        holding_cost: f64,
        /// Delivery lead time in days
        #[arg(long, default_value_t = 14.0)]
        lead_time: f64,
        #[arg(long, default_value_t = opsmath_models::inventory::DEFAULT_OPERATING_DAYS)]
        operating_days: f64,
        /// Include this many samples of the annual cost curve
        #[arg(long)]
        curve: Option<usize>,
    },
    /// Performance of a single-server queue (rates per hour)
    Queue {
        /// Arrivals per hour
        #[arg(long, default_value_t = 30.0)]
        arrival: f64,
        /// Services per hour
        #[arg(long, default_value_t = 35.0)]
        service: f64,
    },
    /// Reliability of machines working in series
    Reliability {
        /// Component as name=reliability, repeatable
        #[arg(
            long = "component",
            value_parser = parse_component,
            default_values = ["Stamping=0.98", "Welding=0.99", "Painting=0.96", "Assembly=0.97"]
        )]
        components: Vec<Component>,
    },
    /// Run every model described in a JSON scenario file
    Scenario {
        /// The scenario file
        file: PathBuf,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Reliability(#[from] ReliabilityError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("Cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scenario {0} describes no models")]
    EmptyScenario(String),
    #[error("{0} scenario section(s) failed")]
    SectionsFailed(usize),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command, cli.format) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, format: Format) -> Result<(), CliError> {
    match command {
        Commands::Produce {
            profit_x,
            profit_y,
            first,
            second,
            x_label,
            y_label,
            frontier,
            tolerance,
        } => {
            let scenario = ProductionScenario {
                x_label,
                y_label,
                constraints: [first, second],
                objective: Objective::new(profit_x, profit_y),
                frontier,
            };
            let report = production_report(&scenario, tolerance)?;
            emit(format, &report, print_production)
        }
        Commands::Inventory {
            demand,
            order_cost,
            holding_cost,
            lead_time,
            operating_days,
            curve,
        } => {
            let params = InventoryParams::new(demand, order_cost, holding_cost, lead_time)
                .with_operating_days(operating_days);
            let report = inventory_report(params, curve)?;
            emit(format, &report, print_inventory)
        }
        Commands::Queue { arrival, service } => {
            let report = queue_report(SingleServerQueue::new(arrival, service))?;
            emit(format, &report, print_queue)
        }
        Commands::Reliability { components } => {
            let report = reliability_report(components)?;
            emit(format, &report, print_reliability)
        }
        Commands::Scenario { file } => {
            let scenario = Scenario::load(&file)?;
            if scenario.is_empty() {
                return Err(CliError::EmptyScenario(file.display().to_string()));
            }
            info!(file = %file.display(), "Running scenario");

            let report = scenario_report(scenario);
            for error in &report.errors {
                eprintln!("Error: {}", error);
            }
            emit(format, &report, print_scenario)?;

            match report.errors.len() {
                0 => Ok(()),
                n => Err(CliError::SectionsFailed(n)),
            }
        }
    }
}

fn emit<T: Serialize>(format: Format, report: &T, pretty: fn(&T)) -> Result<(), CliError> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Pretty => pretty(report),
    }
    Ok(())
}

fn production_report(scenario: &ProductionScenario, tolerance: f64) -> Result<ProductionReport, SolveError> {
    let optimizer = ProductionOptimizer::new().with_tolerance(tolerance);
    let system = ConstraintSystem::new(scenario.constraints.clone(), scenario.objective, optimizer.tolerance())?;
    let result = optimizer.solve_system(&system);
    let frontier = scenario.frontier.map(|samples| system.region().frontier(samples));

    Ok(ProductionReport {
        x_label: scenario.x_label.clone(),
        y_label: scenario.y_label.clone(),
        result,
        frontier,
    })
}

fn inventory_report(params: InventoryParams, curve: Option<usize>) -> Result<InventoryReport, InventoryError> {
    let policy = params.policy()?;
    let curve = curve.map(|samples| params.cost_curve(samples)).transpose()?;
    Ok(InventoryReport { params, policy, curve })
}

fn queue_report(queue: SingleServerQueue) -> Result<QueueReport, QueueError> {
    let metrics = queue.metrics()?;
    Ok(QueueReport {
        queue,
        metrics,
        congested: metrics.is_congested(),
    })
}

fn reliability_report(components: Vec<Component>) -> Result<ReliabilityReport, ReliabilityError> {
    let result = SeriesReliability::evaluate(&components)?;
    Ok(ReliabilityReport { components, result })
}

/// Runs each section independently; a failing model does not hide the others.
fn scenario_report(scenario: Scenario) -> ScenarioReport {
    let mut report = ScenarioReport::default();

    fn record<T, E: std::fmt::Display>(errors: &mut Vec<String>, section: &str, outcome: Result<T, E>) -> Option<T> {
        outcome.map_err(|e| errors.push(format!("{}: {}", section, e))).ok()
    }

    if let Some(production) = &scenario.production {
        let outcome = production_report(production, opsmath_solver::DEFAULT_TOLERANCE);
        report.production = record(&mut report.errors, "production", outcome);
    }
    if let Some(params) = scenario.inventory {
        report.inventory = record(&mut report.errors, "inventory", inventory_report(params, None));
    }
    if let Some(queue) = scenario.queue {
        report.queue = record(&mut report.errors, "queue", queue_report(queue));
    }
    if let Some(components) = scenario.reliability {
        report.reliability = record(&mut report.errors, "reliability", reliability_report(components));
    }
    report
}

/// Parses `name:a,b,c`
fn parse_constraint(s: &str) -> Result<Constraint, String> {
    let (name, coefficients) = s
        .split_once(':')
        .ok_or_else(|| format!("expected name:a,b,c, got '{}'", s))?;
    let values = coefficients
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("invalid number '{}': {}", v.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [a, b, c] => Ok(Constraint::new(name.trim(), *a, *b, *c)),
        _ => Err(format!("expected three coefficients a,b,c, got {}", values.len())),
    }
}

/// Parses `name=reliability`
fn parse_component(s: &str) -> Result<Component, String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=reliability, got '{}'", s))?;
    let reliability = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid reliability '{}': {}", value.trim(), e))?;
    Ok(Component::new(name.trim(), reliability))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_constraint() {
        let c = parse_constraint("wood:4,1.5,120").unwrap();
        assert_eq!(c.name(), "wood");
        assert_eq!((c.a(), c.b(), c.c()), (4.0, 1.5, 120.0));

        assert!(parse_constraint("wood").is_err());
        assert!(parse_constraint("wood:4,1.5").is_err());
        assert!(parse_constraint("wood:4,x,120").is_err());
    }

    #[test]
    fn test_parse_component() {
        let c = parse_component("Painting=0.96").unwrap();
        assert_eq!(c.name, "Painting");
        assert_eq!(c.reliability, 0.96);
        assert!(parse_component("Painting").is_err());
    }

    #[test]
    fn test_produce_defaults() {
        let cli = Cli::try_parse_from(["opsmath", "produce"]).unwrap();
        assert_eq!(cli.format, Format::Pretty);
        match cli.command {
            Commands::Produce { first, second, profit_x, .. } => {
                assert_eq!(first.name(), "hours");
                assert_eq!(second.c(), 120.0);
                assert_eq!(profit_x, 750_000.0);
            }
            _ => panic!("expected produce"),
        }
    }

    #[test]
    fn test_reliability_components_override_defaults() {
        let cli = Cli::try_parse_from([
            "opsmath",
            "--format",
            "json",
            "reliability",
            "--component",
            "Press=0.9",
            "--component",
            "Lathe=0.95",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Commands::Reliability { components } => {
                assert_eq!(components.len(), 2);
                assert_eq!(components[0].name, "Press");
            }
            _ => panic!("expected reliability"),
        }
    }

    #[test]
    fn test_production_report_default_case() {
        let scenario = ProductionScenario {
            x_label: "tables".to_string(),
            y_label: "chairs".to_string(),
            constraints: [
                Constraint::new("hours", 6.0, 2.0, 240.0),
                Constraint::new("wood", 4.0, 1.5, 120.0),
            ],
            objective: Objective::new(750_000.0, 300_000.0),
            frontier: Some(4),
        };
        let report = production_report(&scenario, opsmath_solver::DEFAULT_TOLERANCE).unwrap();
        assert_eq!((report.result.x, report.result.y), (0, 80));
        assert_eq!(report.frontier.as_ref().map(Vec::len), Some(4));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["y"], 80);
        assert_eq!(json["result"]["usage"][1]["name"], "wood");
    }

    #[test]
    fn test_nan_tolerance_is_an_error() {
        let cli = Cli::try_parse_from(["opsmath", "produce", "--tolerance", "NaN"]).unwrap();
        let err = run(cli.command, Format::Json).unwrap_err();
        assert!(err.to_string().contains("tolerance"), "message: {}", err);
    }

    #[test]
    fn test_scenario_keeps_going_after_a_failed_section() {
        let scenario = Scenario::from_json(
            r#"{
                "queue": { "arrival_rate": 40, "service_rate": 35 },
                "reliability": [{ "name": "Welding", "reliability": 0.99 }]
            }"#,
        )
        .unwrap();
        let report = scenario_report(scenario);

        assert!(report.queue.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("queue:"), "{}", report.errors[0]);
        assert_eq!(report.reliability.unwrap().result.weakest_name, "Welding");
    }

    #[test]
    fn test_invalid_production_is_reported_by_parameter() {
        let scenario = Scenario::from_json(
            r#"{ "production": {
                "constraints": [
                    { "name": "hours", "a": 6, "b": 2, "c": -240 },
                    { "name": "wood", "a": 4, "b": 1.5, "c": 120 }
                ],
                "objective": { "px": 1, "py": 1 }
            } }"#,
        )
        .unwrap();
        let report = scenario_report(scenario);
        assert!(report.production.is_none());
        assert!(report.errors[0].contains("hours.c"), "{}", report.errors[0]);
    }
}
