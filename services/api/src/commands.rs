use crate::console::ConsolePage;
use crate::infra::OfflineRiskApi;
use clap::{Args, ValueEnum};
use risk_register::config::AppConfig;
use risk_register::error::AppError;
use risk_register::register::{
    init_page, DeleteOutcome, HtmlPreviewRenderer, HttpRiskApi, InputEvent, PreviewRenderer,
    PreviewSynchronizer, RecommendationSet, RecordOperations, RiskApi, RiskCsvImporter, RiskId,
    RiskSubmission, StatsOutcome, TextPreviewRenderer, View,
};
use risk_register::telemetry::{self, LogTarget};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Probability on the 1-5 scale
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) probability: u8,
    /// Impact on the 1-5 scale
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) impact: u8,
    /// Print the recommendation lists as well as the level
    #[arg(long)]
    pub(crate) recommendations: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum PreviewFormat {
    #[default]
    Text,
    Html,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PreviewArgs {
    /// Title as typed into the form
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Probability as typed; blank or non-numeric values fall back to 3
    #[arg(long)]
    pub(crate) probability: Option<String>,
    /// Impact as typed; blank or non-numeric values fall back to 3
    #[arg(long)]
    pub(crate) impact: Option<String>,
    #[arg(long, value_enum, default_value_t = PreviewFormat::Text)]
    pub(crate) format: PreviewFormat,
    /// Keep reading `field=value` lines from stdin and re-render after each one
    #[arg(long)]
    pub(crate) interactive: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StatsArgs {
    /// Count an exported CSV instead of the remote register
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RecordArgs {
    #[arg(value_parser = crate::infra::parse_risk_id)]
    pub(crate) id: RiskId,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    #[arg(value_parser = crate::infra::parse_risk_id)]
    pub(crate) id: RiskId,
    /// Act as if the risk's detail page is open, so success returns to the list
    #[arg(long)]
    pub(crate) from_detail: bool,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CreateArgs {
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) probability: u8,
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) impact: u8,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    #[arg(long, default_value = "")]
    pub(crate) owner: String,
    #[arg(long)]
    pub(crate) mitigation_plan: Option<String>,
    /// Category the risk is filed under
    #[arg(long)]
    pub(crate) category_id: u64,
}

/// Loads configuration and routes log output to stderr so stdout stays for results.
fn console_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    Ok(config)
}

fn remote_api(config: &AppConfig) -> Result<Arc<HttpRiskApi>, AppError> {
    let api = HttpRiskApi::new(config.api.base_url.clone(), config.api.timeout())?;
    Ok(Arc::new(api))
}

fn stdin_page(view: View) -> ConsolePage<io::StdinLock<'static>, io::Stdout> {
    ConsolePage::new(io::stdin().lock(), io::stdout(), view)
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let set = RecommendationSet::for_inputs(args.probability, args.impact);
    let mut out = io::stdout().lock();
    write_classification(&mut out, &set, args.recommendations)?;
    Ok(())
}

fn write_classification<W: Write>(
    out: &mut W,
    set: &RecommendationSet,
    with_recommendations: bool,
) -> io::Result<()> {
    writeln!(out, "Score: {}", set.score)?;
    writeln!(out, "Level: {}", set.level)?;
    writeln!(out, "Urgency: {}", set.urgency)?;
    writeln!(out, "Follow up within: {}", set.follow_up())?;

    if with_recommendations {
        writeln!(out, "\nGeneral recommendations")?;
        for line in &set.general {
            writeln!(out, "  - {line}")?;
        }
        writeln!(out, "\nSpecific recommendations")?;
        for line in &set.specific {
            writeln!(out, "  - {line}")?;
        }
    }
    Ok(())
}

pub(crate) async fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let bindings = config.page.clone();
    let PreviewArgs {
        title,
        probability,
        impact,
        format,
        interactive,
    } = args;

    let fields = [
        (bindings.title_field.as_str(), title),
        (bindings.probability_field.as_str(), probability),
        (bindings.impact_field.as_str(), impact),
    ];
    let page = stdin_page(View::Create).with_preview_form(&bindings, &fields);

    match format {
        PreviewFormat::Text => {
            let synchronizer = PreviewSynchronizer::with_renderer(bindings, TextPreviewRenderer);
            drive_preview(page, synchronizer, interactive);
        }
        PreviewFormat::Html => {
            let synchronizer = PreviewSynchronizer::with_renderer(bindings, HtmlPreviewRenderer);
            drive_preview(page, synchronizer, interactive);
        }
    }
    Ok(())
}

/// Attaches the preview, then replays `field=value` lines as input events until EOF.
pub(crate) fn drive_preview<I, O, R>(
    mut page: ConsolePage<I, O>,
    mut synchronizer: PreviewSynchronizer<R>,
    interactive: bool,
) -> ConsolePage<I, O>
where
    I: BufRead,
    O: Write,
    R: PreviewRenderer,
{
    if !synchronizer.attach(&mut page) || !interactive {
        return page;
    }

    while let Some(line) = page.read_line() {
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once('=') else {
            page.print("expected field=value");
            continue;
        };
        let field = field.trim();
        if !page.set_field(field, value.trim()) {
            page.print(&format!("unknown field '{field}'"));
            continue;
        }
        synchronizer.on_input(&mut page, &InputEvent::new(field));
    }

    synchronizer.detach();
    page
}

pub(crate) async fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let bindings = config.page.clone();
    let mut page = stdin_page(View::List).with_dashboard(&bindings);

    let api: Arc<dyn RiskApi> = match args.csv {
        Some(path) => Arc::new(OfflineRiskApi::new(RiskCsvImporter::from_path(path)?)),
        None => remote_api(&config)?,
    };

    let session = init_page(api, bindings, TextPreviewRenderer, &mut page).await;
    match session.stats {
        StatsOutcome::Rendered(counts) => {
            for share in counts.breakdown() {
                page.print(&format!(
                    "{:<8} {:>4} ({:.1}%)",
                    share.level.label(),
                    share.count,
                    share.percentage
                ));
            }
            Ok(())
        }
        StatsOutcome::Failed => Err(AppError::Command(
            "risk stats could not be loaded".to_string(),
        )),
        StatsOutcome::Skipped => Ok(()),
    }
}

pub(crate) async fn run_show(args: RecordArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let api = remote_api(&config)?;
    let record = api.fetch_risk(args.id).await?;

    let mut out = io::stdout().lock();
    writeln!(out, "#{} {}", record.id, record.display_title())?;
    if let Some(status) = record.status {
        writeln!(out, "Status: {}", status.label())?;
    }
    writeln!(
        out,
        "Probability {} x impact {} = {} ({})",
        record.probability(),
        record.impact(),
        record.classification().score,
        record.level()
    )?;
    if let Some(owner) = record.owner.as_deref().filter(|owner| !owner.is_empty()) {
        writeln!(out, "Owner: {owner}")?;
    }
    if let Some(description) = record.description.as_deref() {
        writeln!(out, "\n{description}")?;
    }
    if let Some(plan) = &record.mitigation_plan {
        writeln!(out, "\nMitigation plan: {plan}")?;
    }
    if let Some(recommendations) = &record.recommendations {
        writeln!(out, "\nRecommendations:\n{recommendations}")?;
    }
    Ok(())
}

pub(crate) async fn run_delete(args: DeleteArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let view = if args.from_detail {
        View::Detail(args.id)
    } else {
        View::List
    };
    let mut page = stdin_page(view).assume_yes(args.yes);
    let operations = RecordOperations::new(remote_api(&config)?);

    match operations.delete_record(&mut page, args.id).await {
        DeleteOutcome::Failed => Err(AppError::Command(format!(
            "risk {} was not deleted",
            args.id
        ))),
        DeleteOutcome::Cancelled | DeleteOutcome::Deleted { .. } => Ok(()),
    }
}

pub(crate) async fn run_create(args: CreateArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let mut page = stdin_page(View::Create);
    let operations = RecordOperations::new(remote_api(&config)?);

    let submission = RiskSubmission {
        title: args.title,
        description: args.description,
        probability: args.probability,
        impact: args.impact,
        owner: args.owner,
        mitigation_plan: args.mitigation_plan,
        category_id: args.category_id,
    };
    operations.create_record(&mut page, &submission).await?;
    Ok(())
}

pub(crate) async fn run_view(args: RecordArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let mut page = stdin_page(View::List);
    RecordOperations::new(remote_api(&config)?).view_record(&mut page, args.id);
    Ok(())
}

pub(crate) async fn run_edit(args: RecordArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let mut page = stdin_page(View::Detail(args.id));
    RecordOperations::new(remote_api(&config)?).edit_record(&mut page, args.id);
    Ok(())
}
