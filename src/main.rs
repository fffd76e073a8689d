use bar_optimizer::render;
use bar_optimizer::tables::CuttingPlan;
use bar_optimizer::{DemandLine, OptimizationMethod, OptimizeParams, Solver, StockLengthOptions};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "bar_optimizer",
    about = "1D cutting stock optimizer for profile bars"
)]
struct Cli {
    /// Required pieces as CODE:LENGTH:QTY (e.g. ALU001:1200:5 ALU001:800:3)
    #[arg(long = "cuts", num_args = 1.., required = true)]
    cuts: Vec<String>,

    /// Stock bar length in mm
    #[arg(long, default_value_t = 6000.0)]
    stock_length: f64,

    /// Material lost per cut in mm
    #[arg(long, default_value_t = 10.0)]
    gap: f64,

    /// Objective: max-efficiency or min-bar-count
    #[arg(long, default_value = "max-efficiency", value_parser = parse_method)]
    method: OptimizationMethod,

    /// Candidate stock lengths to choose from (e.g. 5500,6000,6500)
    #[arg(long, value_delimiter = ',', conflicts_with = "stock_range")]
    stock_options: Vec<f64>,

    /// Candidate stock lengths as MIN:MAX:STEP (e.g. 5500:6500:100)
    #[arg(long, value_parser = parse_range)]
    stock_range: Option<StockLengthOptions>,

    /// Show ASCII layout of each bar
    #[arg(long)]
    layout: bool,

    /// Print the whole plan as JSON
    #[arg(long)]
    json: bool,

    /// Log each evaluated candidate to stderr
    #[arg(long)]
    verbose: bool,
}

fn parse_method(s: &str) -> Result<OptimizationMethod, String> {
    match s {
        "max-efficiency" => Ok(OptimizationMethod::MaxEfficiency),
        "min-bar-count" => Ok(OptimizationMethod::MinBarCount),
        _ => Err(format!(
            "invalid method '{}', expected: max-efficiency or min-bar-count",
            s
        )),
    }
}

fn parse_range(s: &str) -> Result<StockLengthOptions, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("invalid range '{}', expected MIN:MAX:STEP", s));
    }
    let nums = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| format!("invalid number in range '{}'", s))?;
    Ok(StockLengthOptions::Range {
        min: nums[0],
        max: nums[1],
        step: nums[2],
    })
}

fn parse_cut(s: &str) -> Result<DemandLine, String> {
    let parts: Vec<&str> = s.rsplitn(3, ':').collect();
    if parts.len() != 3 {
        return Err(format!("invalid cut '{}', expected CODE:LENGTH:QTY", s));
    }
    let (qty, length, code) = (parts[0], parts[1], parts[2]);
    let length = length
        .parse::<f64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let quantity = qty
        .parse::<f64>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok(DemandLine::new(code, length, quantity))
}

fn print_plan(plan: &CuttingPlan, gap: f64, layout: bool) {
    for choice in &plan.stock_choices {
        println!(
            "{}: stock {} mm, {} bar{}, {:.2}% efficiency",
            choice.profile_code,
            choice.stock_length,
            choice.bar_count,
            if choice.bar_count == 1 { "" } else { "s" },
            choice.efficiency * 100.0,
        );
    }
    println!();

    for p in &plan.patterns {
        println!(
            "{} bar {}: {} (used {}, remaining {}, {:.2}%)",
            p.profile_code,
            p.bar_number,
            p.cutting_pattern,
            p.used_length,
            p.remaining_length,
            p.efficiency * 100.0,
        );
    }
    if layout {
        println!();
        for pattern in &plan.bars {
            println!("{} bar {}:", pattern.profile_code, pattern.bar_number);
            print!("{}", render::render_bar(pattern, gap));
        }
    }
    println!();

    for a in &plan.assignments {
        println!("  {} {} -> bar {}", a.item_id, a.length, a.bar_number);
    }
    println!();

    for s in &plan.summary {
        println!(
            "Summary {}: {} pieces on {} bars, needed {} of {} mm, waste {} mm, {:.2}% overall, {:.2}% average",
            s.profile_code,
            s.total_pieces,
            s.total_bars_used,
            s.total_length_needed,
            s.total_stock_length,
            s.waste,
            s.overall_efficiency * 100.0,
            s.average_bar_efficiency * 100.0,
        );
    }

    for f in &plan.failures {
        eprintln!("Error: {}", f.message);
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let demand: Vec<DemandLine> = cli
        .cuts
        .iter()
        .map(|c| parse_cut(c))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let mut params = OptimizeParams {
        stock_length: cli.stock_length,
        cutting_gap: cli.gap,
        ..OptimizeParams::default()
    }
    .with_method(cli.method);
    if let Some(range) = cli.stock_range {
        params = params.with_stock_options(range);
    } else if !cli.stock_options.is_empty() {
        params = params.with_stock_options(StockLengthOptions::Choices {
            lengths: cli.stock_options,
        });
    }

    let plan = Solver::new(params, demand).solve().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_plan(&plan, cli.gap, cli.layout);
    }

    if !plan.is_complete() {
        std::process::exit(2);
    }
}
