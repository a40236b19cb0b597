use opsmath_models::{
    Component, CostSample, InventoryParams, InventoryPolicy, QueueMetrics, SeriesReliability,
    SingleServerQueue,
};
use opsmath_solver::{FrontierSample, SolveResult, DEFAULT_TOLERANCE};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProductionReport {
    pub x_label: String,
    pub y_label: String,
    pub result: SolveResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontier: Option<Vec<FrontierSample>>,
}

#[derive(Debug, Serialize)]
pub struct InventoryReport {
    pub params: InventoryParams,
    pub policy: InventoryPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<CostSample>>,
}

#[derive(Debug, Serialize)]
pub struct QueueReport {
    pub queue: SingleServerQueue,
    pub metrics: QueueMetrics,
    pub congested: bool,
}

#[derive(Debug, Serialize)]
pub struct ReliabilityReport {
    pub components: Vec<Component>,
    pub result: SeriesReliability,
}

/// Results of a scenario file run. Failed sections are listed in `errors`.
#[derive(Debug, Default, Serialize)]
pub struct ScenarioReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<QueueReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<ReliabilityReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub fn print_production(report: &ProductionReport) {
    let r = &report.result;
    println!("Production plan");
    println!(
        "Recommended: produce {} {} and {} {}",
        r.x, report.x_label, r.y, report.y_label
    );
    println!("Maximum profit: Rp {}", group_thousands(r.profit));
    if (r.continuous.profit - r.profit).abs() > DEFAULT_TOLERANCE * r.profit.abs().max(1.0) {
        println!(
            "  (continuous optimum ({:.2}, {:.2}) would earn Rp {}; whole units only)",
            r.continuous.point.x,
            r.continuous.point.y,
            group_thousands(r.continuous.profit)
        );
    }
    if !r.bounded {
        println!("  Warning: one product is not limited by any resource");
    }
    println!();

    println!("Resource usage:");
    for usage in &r.usage {
        println!(
            "  {:20} {:10.1} / {:<10} ({:.1}%)",
            usage.name,
            usage.used,
            trim_number(usage.bound),
            usage.utilization * 100.0
        );
    }
    println!();

    println!("Corner points:");
    for vertex in &r.vertices {
        println!(
            "  ({:8.2}, {:8.2})  Rp {}",
            vertex.point.x,
            vertex.point.y,
            group_thousands(vertex.profit)
        );
    }

    if let Some(frontier) = &report.frontier {
        println!();
        println!("Feasible region boundary:");
        for sample in frontier {
            let upper = sample
                .upper
                .map(|y| format!("{:.2}", y))
                .unwrap_or_else(|| "unbounded".to_string());
            println!("  x = {:8.2}  y <= {}", sample.x, upper);
        }
    }
}

pub fn print_inventory(report: &InventoryReport) {
    let p = &report.policy;
    println!("Inventory policy (EOQ)");
    println!(
        "Order {:.0} units whenever stock falls to {:.1}, roughly every {:.1} days",
        p.eoq, p.reorder_point, p.cycle_days
    );
    println!();
    println!("  {:28} {:.0}", "Economic order quantity", p.eoq);
    println!("  {:28} {:.1}", "Reorder point", p.reorder_point);
    println!("  {:28} {:.2}", "Orders per year", p.orders_per_year);
    println!("  {:28} Rp {}", "Annual ordering cost", group_thousands(p.ordering_cost));
    println!("  {:28} Rp {}", "Annual holding cost", group_thousands(p.holding_cost));
    println!("  {:28} Rp {}", "Total inventory cost", group_thousands(p.total_cost));

    if let Some(curve) = &report.curve {
        println!();
        println!("Cost curve:");
        for sample in curve {
            println!(
                "  q = {:10.1}  holding {:>16}  ordering {:>16}  total {:>16}",
                sample.quantity,
                group_thousands(sample.holding),
                group_thousands(sample.ordering),
                group_thousands(sample.total)
            );
        }
    }
}

pub fn print_queue(report: &QueueReport) {
    let m = &report.metrics;
    println!("Single-server queue (M/M/1)");
    if report.congested {
        println!(
            "Warning: utilization {:.1}% is very high; expect long queues",
            m.utilization * 100.0
        );
    } else {
        println!("Utilization {:.1}% is healthy", m.utilization * 100.0);
    }
    println!();
    println!("  {:32} {:.2}", "Mean number in system (L)", m.in_system);
    println!("  {:32} {:.2}", "Mean number waiting (Lq)", m.in_queue);
    println!("  {:32} {:.2} min", "Mean time in system (W)", m.time_in_system * 60.0);
    println!("  {:32} {:.2} min", "Mean time waiting (Wq)", m.time_in_queue * 60.0);
    println!("  {:32} {:.1}%", "Server idle (P0)", m.idle_probability * 100.0);

    let (waiting, service) = m.time_split();
    println!(
        "  {:32} {:.1}% waiting / {:.1}% in service",
        "Time split",
        waiting * 100.0,
        service * 100.0
    );
}

pub fn print_reliability(report: &ReliabilityReport) {
    let r = &report.result;
    println!("Series system reliability");
    for (index, component) in report.components.iter().enumerate() {
        let marker = if index == r.weakest_index { "  <- weakest" } else { "" };
        println!("  {:20} {:6.2}%{}", component.name, component.reliability * 100.0, marker);
    }
    println!();
    println!("  {:20} {:6.2}%", "System", r.system * 100.0);
    println!("  {:20} {:6.2}%", "Failure probability", r.failure_probability * 100.0);
    println!();
    println!(
        "Prioritize maintenance on {}: it is the weakest link",
        r.weakest_name
    );
}

pub fn print_scenario(report: &ScenarioReport) {
    let mut first = true;
    let mut separate = || {
        if !first {
            println!();
        }
        first = false;
    };

    if let Some(production) = &report.production {
        separate();
        print_production(production);
    }
    if let Some(inventory) = &report.inventory {
        separate();
        print_inventory(inventory);
    }
    if let Some(queue) = &report.queue {
        separate();
        print_queue(queue);
    }
    if let Some(reliability) = &report.reliability {
        separate();
        print_reliability(reliability);
    }
}

/// Round to whole units and separate thousands with commas
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Integers print without a fractional part
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
