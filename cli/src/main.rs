//! Command-line host for the WellCare screen controllers.
//!
//! Each subcommand plays the part of one screen: it asks the controller for
//! requests, executes them with `UreqTransport`, and prints whatever rows,
//! cards, or alerts the controller hands back.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wellcare_core::screens::{
    AddPatientScreen, AddTestScreen, Alert, Confirmation, CriticalPatientsScreen, Outcome,
    PatientCard, PatientDetailsScreen, PatientHistoryScreen, PatientsListScreen, Submission,
    TestRow, UpdatePatientScreen, UpdateTestScreen,
};
use wellcare_core::{ApiClient, ClientConfig, PatientClient, PatientForm, TestForm, UreqTransport};

#[derive(Parser)]
#[command(name = "wellcare")]
#[command(about = "WellCare patient records from the command line")]
struct Cli {
    /// API base URL; overrides WELLCARE_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },
    /// List critical patients
    Critical,
    /// Show a patient and their most recent tests
    Show { id: String },
    /// Show a patient's full test history
    History { id: String },
    /// Add a patient
    AddPatient(PatientFields),
    /// Edit a patient; omitted fields keep their current values
    UpdatePatient {
        id: String,
        #[command(flatten)]
        fields: PatientFields,
    },
    /// Delete a patient
    DeletePatient {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Record a test for a patient
    AddTest {
        patient_id: String,
        #[command(flatten)]
        fields: TestFields,
    },
    /// Edit a test; omitted fields keep their current values
    UpdateTest {
        patient_id: String,
        test_id: String,
        #[command(flatten)]
        fields: TestFields,
    },
    /// Delete a test
    DeleteTest {
        patient_id: String,
        test_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct PatientFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<String>,
    /// male, female or other
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long = "phone")]
    phone_number: Option<String>,
    /// Comma-separated conditions
    #[arg(long = "history")]
    medical_history: Option<String>,
}

impl PatientFields {
    fn apply(self, form: &mut PatientForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.age, &mut form.age),
            (self.gender, &mut form.gender),
            (self.address, &mut form.address),
            (self.phone_number, &mut form.phone_number),
            (self.medical_history, &mut form.medical_history),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Args)]
struct TestFields {
    /// Blood Pressure, Respiratory Rate, Blood Oxygen Level or Heartbeat Rate
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    value: Option<String>,
}

impl TestFields {
    fn apply(self, form: &mut TestForm) {
        if let Some(kind) = self.kind {
            form.kind = kind;
        }
        if let Some(value) = self.value {
            form.value = value;
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("wellcare=info".parse()?)
                .add_directive("wellcare_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match cli.base_url {
        Some(url) => ClientConfig::from_env_value(Some(url)),
        None => ClientConfig::from_env(),
    };
    let routes = config.client();
    let api = ApiClient::new(routes.clone(), UreqTransport::new());
    tracing::debug!(base_url = routes.base_url(), "client ready");

    match cli.command {
        Commands::List { search } => list(&api, routes, search),
        Commands::Critical => critical(&api, routes),
        Commands::Show { id } => show(&api, routes, &id),
        Commands::History { id } => history(&api, routes, &id),
        Commands::AddPatient(fields) => {
            let mut screen = AddPatientScreen::new(routes);
            fields.apply(&mut screen.form);
            let reply = send(&api, screen.submit())?;
            finish(screen.on_created(reply))
        }
        Commands::UpdatePatient { id, fields } => {
            let mut screen = UpdatePatientScreen::new(routes, &id)?;
            let req = screen.on_mount();
            check(screen.on_patient(api.send(&req)))?;
            fields.apply(&mut screen.form);
            let reply = send(&api, screen.submit())?;
            finish(screen.on_updated(reply))
        }
        Commands::DeletePatient { id, yes } => {
            let mut screen = UpdatePatientScreen::new(routes, &id)?;
            let Some(confirmation) = screen.request_delete() else {
                bail!("a submission is already in progress");
            };
            if !confirm(&confirmation, yes)? {
                screen.cancel_delete();
                return Ok(());
            }
            match screen.confirm_delete() {
                Some(req) => finish(screen.on_deleted(api.send(&req))),
                None => Ok(()),
            }
        }
        Commands::AddTest { patient_id, fields } => {
            let mut screen = AddTestScreen::new(routes, &patient_id)?;
            fields.apply(&mut screen.form);
            let reply = send(&api, screen.submit())?;
            finish(screen.on_created(reply))
        }
        Commands::UpdateTest {
            patient_id,
            test_id,
            fields,
        } => {
            let mut screen = UpdateTestScreen::new(routes, &patient_id, &test_id)?;
            let req = screen.on_mount();
            check(screen.on_test(api.send(&req)))?;
            fields.apply(&mut screen.form);
            let reply = send(&api, screen.submit())?;
            finish(screen.on_updated(reply))
        }
        Commands::DeleteTest {
            patient_id,
            test_id,
            yes,
        } => {
            let mut screen = UpdateTestScreen::new(routes, &patient_id, &test_id)?;
            let Some(confirmation) = screen.request_delete() else {
                bail!("a submission is already in progress");
            };
            if !confirm(&confirmation, yes)? {
                screen.cancel_delete();
                return Ok(());
            }
            match screen.confirm_delete() {
                Some(req) => finish(screen.on_deleted(api.send(&req))),
                None => Ok(()),
            }
        }
    }
}

type Api = ApiClient<UreqTransport>;

fn list(api: &Api, routes: PatientClient, search: Option<String>) -> Result<()> {
    let mut screen = PatientsListScreen::new(routes);
    let req = screen.on_focus();
    check(screen.on_patients(api.send(&req)))?;
    if let Some(query) = search {
        screen.set_query(query);
    }
    let rows = screen.rows();
    if rows.is_empty() {
        println!("No patients found.");
    }
    for row in rows {
        let flag = if row.critical { "  [critical]" } else { "" };
        println!("{}  {}  {}{flag}", row.id, row.name, row.summary);
    }
    Ok(())
}

fn critical(api: &Api, routes: PatientClient) -> Result<()> {
    let mut screen = CriticalPatientsScreen::new(routes);
    if let Some(req) = screen.on_mount() {
        check(screen.on_patients(api.send(&req)))?;
    }
    if let Some(text) = screen.empty_text() {
        println!("{text}");
    }
    for row in screen.rows() {
        println!("{}  {}  {}", row.id, row.name, row.summary);
    }
    Ok(())
}

fn show(api: &Api, routes: PatientClient, id: &str) -> Result<()> {
    let mut screen = PatientDetailsScreen::new(routes, id)?;
    let reqs = screen.on_focus();
    if let [patient, tests] = reqs.as_slice() {
        check(screen.on_patient(api.send(patient)))?;
        check(screen.on_tests(api.send(tests)))?;
    }
    if let Some(card) = screen.card() {
        print_card(&card);
    }
    println!();
    println!("Recent Tests");
    if let Some(text) = screen.empty_tests_text() {
        println!("{text}");
    }
    for row in screen.recent_tests() {
        print_test(&row);
    }
    Ok(())
}

fn history(api: &Api, routes: PatientClient, id: &str) -> Result<()> {
    let mut screen = PatientHistoryScreen::new(routes, id)?;
    let req = screen.on_mount();
    check(screen.on_history(api.send(&req)))?;
    if let Some(card) = screen.card() {
        print_card(&card);
    }
    println!();
    println!("Test History");
    if let Some(text) = screen.empty_tests_text() {
        println!("{text}");
    }
    for row in screen.tests() {
        print_test(&row);
    }
    Ok(())
}

fn print_card(card: &PatientCard) {
    println!("{}", card.name);
    println!("{}", card.summary);
    if !card.address.is_empty() {
        println!("Address: {}", card.address);
    }
    if !card.phone_number.is_empty() {
        println!("Phone: {}", card.phone_number);
    }
    if card.critical {
        println!("Critical Condition");
    }
}

fn print_test(row: &TestRow) {
    let date = row.date.as_deref().unwrap_or("-");
    println!("{}  {date}  {}: {}", row.id, row.kind, row.value);
}

/// Turn a load alert into a command failure.
fn check(alert: Option<Alert>) -> Result<()> {
    match alert {
        Some(alert) => bail!("{}", alert.message),
        None => Ok(()),
    }
}

/// Execute an accepted submission; a rejected one ends the command.
fn send(api: &Api, submission: Submission) -> Result<wellcare_core::Reply> {
    match submission {
        Submission::Send(req) => Ok(api.send(&req)),
        Submission::Rejected(alert) => bail!("{}", alert.message),
        Submission::Busy => bail!("a submission is already in progress"),
    }
}

fn finish(outcome: Outcome) -> Result<()> {
    if !outcome.succeeded() {
        bail!("{}", outcome.alert.message);
    }
    println!("{}", outcome.alert.message);
    Ok(())
}

/// Ask on stdin unless `--yes` was given. Anything but y/yes cancels.
fn confirm(confirmation: &Confirmation, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let mut stderr = io::stderr();
    write!(
        stderr,
        "{}: {} [{}/{}] ",
        confirmation.title, confirmation.message, confirmation.confirm_label, confirmation.cancel_label
    )?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes" || answer == confirmation.confirm_label.to_ascii_lowercase())
}
