//! Line-oriented dashboard session: the same pages as the one-shot
//! commands, with the session context held in memory between them.

use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use distress_core::classifier::{shared_model, DistressLabel, DistressModel};
use distress_core::config::DashboardConfig;
use distress_core::dashboard::{
    calculate_page, model_card, prediction_page, usage_guide, PredictionReport,
};
use distress_core::interpretation::narrative::FLAGS_HEADLINE;
use distress_core::ratios::{RatioForm, RatioReport, RatioSet};
use distress_core::session::SessionContext;
use distress_core::ComputationOutput;

const MENU: [(&str, &str); 5] = [
    ("1", "Home"),
    ("2", "Guide"),
    ("3", "Ratio Calculator"),
    ("4", "Prediction"),
    ("q", "Quit"),
];

/// Calculator prompts, in `RatioForm` field order.
const FORM_PROMPTS: [&str; 8] = [
    "Current assets",
    "Current liabilities",
    "Inventory",
    "Cash and cash equivalents",
    "Net income",
    "Total assets",
    "Total equity",
    "Sales / revenue",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Guide,
    Calculator,
    Prediction,
    Quit,
}

impl Page {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice.to_ascii_lowercase().as_str() {
            "1" | "home" => Some(Self::Home),
            "2" | "guide" => Some(Self::Guide),
            "3" | "ratios" | "calculator" => Some(Self::Calculator),
            "4" | "predict" | "prediction" => Some(Self::Prediction),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Load the model, then run the menu loop on stdin/stdout. The session file,
/// when configured, is read before the loop and written after it.
pub fn run_dashboard(config: &DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let model = shared_model(&config.model_path)?;
    let mut session = match config.session_path {
        Some(ref path) => SessionContext::load(path)?,
        None => SessionContext::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(model, &mut session, stdin.lock(), stdout.lock())?;

    if let Some(ref path) = config.session_path {
        session.save(path)?;
    }
    Ok(())
}

/// Menu loop. Ends on Quit or end of input.
pub fn run_session<M, R, W>(
    model: &M,
    session: &mut SessionContext,
    mut input: R,
    mut out: W,
) -> io::Result<()>
where
    M: DistressModel + ?Sized,
    R: BufRead,
    W: Write,
{
    render_home(&mut out)?;

    loop {
        writeln!(out)?;
        let menu: Vec<String> = MENU
            .iter()
            .map(|(key, name)| format!("[{}] {}", key, name))
            .collect();
        writeln!(out, "{}", menu.join("  ").bold())?;

        let Some(choice) = prompt(&mut input, &mut out, "Page")? else {
            break;
        };
        match Page::from_choice(&choice) {
            Some(Page::Home) => render_home(&mut out)?,
            Some(Page::Guide) => render_guide(&mut out)?,
            Some(Page::Calculator) => {
                let form = read_form(&mut input, &mut out)?;
                let report = calculate_page(&form, session);
                render_ratios(&mut out, &report)?;
            }
            Some(Page::Prediction) => {
                let ratios = read_ratios(&mut input, &mut out, session.prediction_defaults())?;
                let report = prediction_page(model, &ratios);
                render_prediction(&mut out, &report)?;
            }
            Some(Page::Quit) => break,
            None if choice.is_empty() => {}
            None => writeln!(out, "{}", format!("Unknown page: {}", choice).yellow())?,
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Print a label and read one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}: ", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_form<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<RatioForm> {
    writeln!(out, "{}", "Ratio Calculator".bold().underline())?;
    writeln!(out, "Indonesian format, e.g. 1.234.567,50. Blank counts as 0.")?;

    let mut answers = Vec::with_capacity(FORM_PROMPTS.len());
    for label in FORM_PROMPTS {
        answers.push(prompt(input, out, label)?.filter(|s| !s.is_empty()));
    }

    let mut answers = answers.into_iter();
    let mut next = || answers.next().flatten();
    Ok(RatioForm {
        current_assets: next(),
        current_liabilities: next(),
        inventory: next(),
        cash: next(),
        net_income: next(),
        total_assets: next(),
        equity: next(),
        sales: next(),
    })
}

/// Prompt for each ratio in classifier order. Blank or unreadable answers
/// keep the default.
fn read_ratios<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    defaults: RatioSet,
) -> io::Result<RatioSet> {
    writeln!(out, "{}", "Prediction".bold().underline())?;
    writeln!(out, "Decimal point notation, e.g. 1.25. Blank keeps the value in brackets.")?;

    let mut values = [Decimal::ZERO; 6];
    for (slot, (kind, default)) in values.iter_mut().zip(defaults.iter()) {
        let answer = prompt(input, out, &format!("{} [{}]", kind.label(), default))?;
        *slot = match answer.as_deref() {
            None | Some("") => default,
            Some(text) => match Decimal::from_str(text) {
                Ok(value) => value,
                Err(_) => {
                    writeln!(out, "{}", format!("Not a number, keeping {}", default).yellow())?;
                    default
                }
            },
        };
    }

    let [current_ratio, quick_ratio, cash_ratio, roa, roe, npm] = values;
    Ok(RatioSet {
        current_ratio,
        quick_ratio,
        cash_ratio,
        roa,
        roe,
        npm,
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_home<W: Write>(out: &mut W) -> io::Result<()> {
    let card = model_card();
    writeln!(out, "{}", "Financial Distress Prediction".bold())?;
    writeln!(out, "{}", card.purpose)?;
    writeln!(out, "  Algorithm:    {}", card.algorithm)?;
    writeln!(out, "  Architecture: {}", card.architecture)?;
    writeln!(out, "  Inputs:       {}", card.inputs.join(", "))?;
    writeln!(out, "  Output:       {}", card.output)?;
    writeln!(
        out,
        "  Validation:   accuracy {}, AUC {}, F1 {}",
        card.validation.accuracy, card.validation.auc, card.validation.f1_score
    )?;
    writeln!(out, "  Trained on:   {}", card.training_scope)?;
    writeln!(out, "{}", card.disclaimer.dimmed())
}

fn render_guide<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "How to use the dashboard".bold().underline())?;
    for (i, section) in usage_guide().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, section.title.bold())?;
        for point in &section.points {
            writeln!(out, "   - {}", point)?;
        }
    }
    Ok(())
}

fn render_warnings<W: Write>(out: &mut W, warnings: &[String]) -> io::Result<()> {
    for warning in warnings {
        writeln!(out, "{}", format!("! {}", warning).yellow())?;
    }
    Ok(())
}

fn render_ratios<W: Write>(
    out: &mut W,
    report: &ComputationOutput<RatioReport>,
) -> io::Result<()> {
    writeln!(out)?;
    for line in &report.result.lines {
        writeln!(
            out,
            "  {:<20} {:>10}   {}",
            line.label,
            line.display,
            line.formula.dimmed()
        )?;
    }
    render_warnings(out, &report.warnings)?;
    writeln!(out, "{}", "Ratios saved as the prediction page defaults.".green())
}

fn render_prediction<W: Write>(
    out: &mut W,
    report: &ComputationOutput<PredictionReport>,
) -> io::Result<()> {
    let result = &report.result;
    let label = result.prediction.label.to_string();
    let label = match result.prediction.label {
        DistressLabel::FinancialDistress => label.red().bold(),
        DistressLabel::NonFinancialDistress => label.green().bold(),
    };

    writeln!(out)?;
    writeln!(out, "Probability of financial distress: {}", result.probability_display.bold())?;
    writeln!(out, "Prediction: {}", label)?;
    render_warnings(out, &report.warnings)?;

    let interpretation = &result.interpretation;
    writeln!(out)?;
    writeln!(out, "{}", "Ratio review".bold())?;
    match interpretation.summary {
        Some(summary) => writeln!(out, "{}", summary)?,
        None => {
            writeln!(out, "{}", FLAGS_HEADLINE)?;
            for flag in &interpretation.flags {
                writeln!(out, "  - {}: {}", flag.name.bold(), flag.explanation)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", interpretation.recommendation.headline)?;
    for (i, action) in interpretation.recommendation.actions.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, action)?;
    }
    if let Some(ref note) = interpretation.influential_note {
        writeln!(out, "{}", note)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "For investors".bold())?;
    for point in &interpretation.investor_note.points {
        writeln!(out, "  - {}", point)?;
    }
    Ok(())
}
