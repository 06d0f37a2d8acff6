//! `edupulse` - CLI for the edupulse school administration backend
//!
//! Every entity view is a subcommand group. Commands that change data write
//! the whole collection back before exiting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use edupulse::assistant::{AssistantPanel, Conversation, GeminiClient, Reply};
use edupulse::attendance::{load_ledger, AttendanceRegister};
use edupulse::cli::render::{self, Tabular};
use edupulse::cli::{
    AttendanceCommand, ChatCommand, Cli, Command, CommitArgs, ConfigCommand, CourseCommand,
    EventCommand, OutputFormat, RemoveArgs, SchoolCommand, ShowArgs, StudentCommand,
    TeacherCommand,
};
use edupulse::model::{
    AttendanceStatus, Course, CourseDraft, Draft, Entity, Event, EventDraft, Student,
    StudentDraft, Teacher, TeacherDraft,
};
use edupulse::{
    init_logging, Config, DashboardSummary, EntityCollection, KeyValueStore, ListView,
    Removal, Result, SchoolSettings, SharedStore, SqliteStore, Synced,
};

/// One verb on an entity view, with the add draft and update patch resolved.
enum Verb<D, P> {
    List(OutputFormat),
    Show(ShowArgs),
    Add(D),
    Update(String, P),
    Remove(RemoveArgs),
}

macro_rules! verb {
    ($cmd:expr, $kind:ident, $entity:ty, $draft:ty) => {
        match $cmd {
            $kind::List(args) => Verb::List(args.format),
            $kind::Show(args) => Verb::Show(args),
            $kind::Add(args) => Verb::Add(<$draft>::from(args)),
            $kind::Update(args) => Verb::Update(args.id.clone(), move |e: &mut $entity| {
                args.apply(e);
            }),
            $kind::Remove(args) => Verb::Remove(args),
        }
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    let result = match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        command => {
            let db = SqliteStore::open(config.database_path())
                .context("failed to open the database")?;
            run(command, &config, db).await
        }
    };

    match result {
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            eprintln!("error: {e}");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

async fn run(command: Command, config: &Config, db: SqliteStore) -> Result<()> {
    if let Command::Status(cmd) = &command {
        return handle_status(&db, cmd.json);
    }

    let store = db.shared();
    match command {
        Command::Students(cmd) => {
            let verb = verb!(cmd, StudentCommand, Student, StudentDraft);
            run_view::<Student, _, _>(store, config, verb).await
        }
        Command::Teachers(cmd) => {
            let verb = verb!(cmd, TeacherCommand, Teacher, TeacherDraft);
            run_view::<Teacher, _, _>(store, config, verb).await
        }
        Command::Courses(cmd) => {
            let verb = verb!(cmd, CourseCommand, Course, CourseDraft);
            run_view::<Course, _, _>(store, config, verb).await
        }
        Command::Events(cmd) => {
            let verb = verb!(cmd, EventCommand, Event, EventDraft);
            run_view::<Event, _, _>(store, config, verb).await
        }
        Command::Admit(cmd) => {
            let mut view = ListView::<Student>::mount(store, config.confirm_window());
            let synced = view.admit(cmd.into())?;
            report_synced("Admitted", &synced);
            print!("{}", render::detail(&synced.value));
            Ok(())
        }
        Command::Attendance(cmd) => handle_attendance(&store, cmd),
        Command::School(cmd) => handle_school(store, cmd),
        Command::Dashboard { json } => handle_dashboard(&store, json),
        Command::Report { student_id } => {
            let view = ListView::<Student>::mount(store, config.confirm_window());
            let student = view.require(&student_id)?;
            let panel = assistant_panel(config)?;
            print_reply(&panel.student_report(student).await?);
            Ok(())
        }
        Command::Syllabus { course_id } => {
            let view = ListView::<Course>::mount(store, config.confirm_window());
            let course = view.require(&course_id)?;
            let panel = assistant_panel(config)?;
            print_reply(&panel.course_syllabus(course).await?);
            Ok(())
        }
        Command::Chat(cmd) => handle_chat(config, cmd).await,
        Command::Status(_) | Command::Config(_) => Ok(()),
    }
}

async fn run_view<T, D, P>(store: SharedStore, config: &Config, verb: Verb<D, P>) -> Result<()>
where
    T: Entity + Tabular,
    D: Draft<Entity = T>,
    P: FnOnce(&mut T),
{
    let mut view = ListView::<T>::mount(store, config.confirm_window());

    match verb {
        Verb::List(OutputFormat::Table) => print!("{}", render::table(view.items())),
        Verb::List(OutputFormat::Json) => print_json(view.items())?,
        Verb::Show(args) => {
            let item = view.require(&args.id)?;
            if args.json {
                print_json(item)?;
            } else {
                print!("{}", render::detail(item));
            }
        }
        Verb::Add(draft) => {
            let synced = view.add(draft)?;
            report_synced("Added", &synced);
        }
        Verb::Update(id, patch) => {
            let synced = view.update(&id, patch)?;
            report_synced("Updated", &synced);
        }
        Verb::Remove(args) => remove_with_confirmation(&mut view, &args).await?,
    }
    Ok(())
}

async fn remove_with_confirmation<T: Entity>(
    view: &mut ListView<T>,
    args: &RemoveArgs,
) -> Result<()> {
    let Removal::Armed { deadline } = view.remove(&args.id, Instant::now())? else {
        return Ok(());
    };

    if !args.yes {
        let remaining = deadline.saturating_duration_since(Instant::now());
        println!(
            "Press Enter within {:.1}s to remove {} '{}' (Ctrl-C to cancel)",
            remaining.as_secs_f64(),
            T::KIND,
            args.id
        );
        stdin_lines().next_line().await?;
    }

    match view.remove(&args.id, Instant::now())? {
        Removal::Removed(synced) => report_synced("Removed", &synced),
        Removal::Armed { .. } => println!(
            "Confirmation window expired; {} '{}' was not removed.",
            T::KIND,
            args.id
        ),
    }
    Ok(())
}

fn handle_attendance(store: &SharedStore, cmd: AttendanceCommand) -> Result<()> {
    let students = EntityCollection::<Student>::open(store.clone());
    let mut register = AttendanceRegister::from_students(students.items());

    match cmd {
        AttendanceCommand::Show { json } => {
            if json {
                print_json(register.records())?;
            } else {
                print!("{}", render::table(register.records()));
                print_rate(&register);
            }
        }
        AttendanceCommand::Toggle { ids, commit } => {
            for id in &ids {
                let status = register.toggle(id)?;
                println!("{id}: {status}");
            }
            print_rate(&register);
            commit_if_requested(&register, store, &commit)?;
        }
        AttendanceCommand::MarkAll { commit } => {
            register.mark_all_present();
            print_rate(&register);
            commit_if_requested(&register, store, &commit)?;
        }
        AttendanceCommand::Commit { absent, late, date } => {
            for id in &absent {
                register.set_status(id, AttendanceStatus::Absent)?;
            }
            for id in &late {
                register.set_status(id, AttendanceStatus::Late)?;
            }
            let date = date.unwrap_or_else(today);
            register.commit(store.as_ref(), date)?;
            print_rate(&register);
            println!("Committed register for {date}.");
        }
        AttendanceCommand::History { json } => {
            let ledger = load_ledger(store.as_ref());
            if json {
                print_json(&ledger)?;
            } else if ledger.is_empty() {
                println!("No registers committed yet.");
            } else {
                for entry in &ledger {
                    let day = AttendanceRegister::from_records(entry.records.clone());
                    println!(
                        "{}  {}/{} present ({}%)",
                        entry.date,
                        day.present_count(),
                        day.records().len(),
                        day.rate()
                    );
                }
            }
        }
    }
    Ok(())
}

fn commit_if_requested(
    register: &AttendanceRegister,
    store: &SharedStore,
    args: &CommitArgs,
) -> Result<()> {
    if args.commit {
        let date = args.date.unwrap_or_else(today);
        register.commit(store.as_ref(), date)?;
        println!("Committed register for {date}.");
    }
    Ok(())
}

fn handle_school(store: SharedStore, cmd: SchoolCommand) -> Result<()> {
    let mut settings = SchoolSettings::load(store);

    match cmd {
        SchoolCommand::Show { json } => {
            if json {
                print_json(settings.config())?;
            } else {
                let config = settings.config();
                println!("Name:   {}", config.name);
                println!("Term:   {}", config.term);
                println!("Email:  {}", config.email);
            }
        }
        SchoolCommand::Set { name, term, email } => {
            if name.is_none() && term.is_none() && email.is_none() {
                println!("Nothing to change. Use --name, --term or --email.");
                return Ok(());
            }
            settings.save(|config| {
                if let Some(name) = name {
                    config.name = name;
                }
                if let Some(term) = term {
                    config.term = term;
                }
                if let Some(email) = email {
                    config.email = email;
                }
            })?;
            println!("School settings saved.");
        }
    }
    Ok(())
}

fn handle_dashboard(store: &SharedStore, json: bool) -> Result<()> {
    let summary = DashboardSummary::collect(store);
    if json {
        return print_json(&summary);
    }

    println!("{} - {}", summary.school.name, summary.school.term);
    println!("---------------------------------");
    println!("Students:            {}", summary.students);
    println!("Teachers:            {}", summary.teachers);
    println!("Courses:             {}", summary.courses);
    println!("Upcoming events:     {}", summary.events);
    match summary.average_attendance {
        Some(avg) => println!("Average attendance:  {avg:.1}%"),
        None => println!("Average attendance:  n/a"),
    }
    Ok(())
}

async fn handle_chat(config: &Config, cmd: ChatCommand) -> Result<()> {
    let panel = assistant_panel(config)?;
    let mut conversation = Conversation::new();

    if let Some(message) = cmd.message {
        print_reply(&conversation.send(&panel, &message).await?);
        return Ok(());
    }

    println!("{}", conversation.messages()[0].text);
    println!("(empty line or Ctrl-D to quit)");
    let mut lines = stdin_lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }
        print_reply(&conversation.send(&panel, &line).await?);
    }
    Ok(())
}

fn handle_status(db: &SqliteStore, json: bool) -> Result<()> {
    let stats = db.stats()?;
    let keys = db.keys()?;

    if json {
        let status = serde_json::json!({
            "database_path": db.path(),
            "slot_count": stats.slot_count,
            "slots": keys,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("edupulse status");
        println!("---------------");
        println!("Database:      {}", db.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Slots:         {}", stats.slot_count);
        for key in &keys {
            println!("  - {key}");
        }
        println!(
            "Last write:    {}",
            stats.last_write.as_deref().unwrap_or("never")
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let mut shown = config.clone();
            if shown.assistant.api_key.is_some() {
                shown.assistant.api_key = Some("********".to_string());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Assistant]");
                println!("  Endpoint:           {}", shown.assistant.endpoint);
                println!("  Model:              {}", shown.assistant.model);
                println!(
                    "  API key:            {}",
                    shown.assistant.api_key.as_deref().unwrap_or("(not set)")
                );
                match config.request_timeout() {
                    Some(timeout) => println!("  Timeout:            {}s", timeout.as_secs()),
                    None => println!("  Timeout:            none"),
                }
                println!();
                println!("[Interface]");
                println!(
                    "  Confirm window:     {}ms",
                    shown.interface.confirm_window_ms
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn assistant_panel(config: &Config) -> Result<AssistantPanel> {
    let client = GeminiClient::new(&config.assistant, config.request_timeout())?;
    Ok(AssistantPanel::new(Arc::new(client), &config.assistant))
}

fn report_synced<T: Entity>(action: &str, synced: &Synced<T>) {
    println!("{action} {} '{}'.", T::KIND, synced.value.id());
    if let Some(e) = &synced.warning {
        eprintln!("warning: the change is not saved and will be lost on exit: {e}");
    }
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.text());
}

fn print_rate(register: &AttendanceRegister) {
    println!(
        "Present: {}/{} ({}%)",
        register.present_count(),
        register.records().len(),
        register.rate()
    );
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
