use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use shared::{Gender, PostType, ScheduleType};

use gym_manager::components::calendar::{render_calendar_text, render_day_text};
use gym_manager::components::member_detail::{render_member_detail_text, render_member_list_text};
use gym_manager::components::monthly_schedule::{render_monthly_schedule, render_monthly_text};
use gym_manager::domain::member_form::MemberFormState;
use gym_manager::domain::post_form::PostFormState;
use gym_manager::domain::schedule_form::ScheduleFormService;
use gym_manager::hooks::{CalendarController, MembersController};
use gym_manager::hooks::use_calendar::FetchOutcome;
use gym_manager::services::date_utils::{parse_date_string, to_date_key, today};
use gym_manager::services::logging::init_logging;
use gym_manager::services::traits::ScheduleSource;
use gym_manager::{ApiClient, ClientConfig, TokenStore, YearMonth};

#[derive(Parser)]
#[command(name = "gym")]
#[command(about = "Gym schedules and member activity from the command line")]
struct Cli {
    /// Config file (defaults to <config dir>/gym-manager/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// REST API root, e.g. http://127.0.0.1:8000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// API token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with schedule counts
    Calendar {
        #[arg(long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Day to select (YYYY-MM-DD), listed under the grid
        #[arg(long)]
        select: Option<String>,
    },
    /// List every schedule of one day
    Day {
        /// YYYY-MM-DD
        date: String,
    },
    /// Per-type totals and the agenda of a month
    Summary {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// List members
    Members,
    /// Register a member
    AddMember {
        name: String,

        phone: String,

        #[arg(long)]
        email: Option<String>,

        /// M or F
        #[arg(long)]
        gender: Option<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<String>,

        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        join_date: Option<String>,

        /// Trainer id
        #[arg(long)]
        trainer: Option<i64>,

        #[arg(long)]
        goals: Option<String>,
    },
    /// Show a member and their activity feed
    Feed { member_id: i64 },
    /// Create a schedule
    AddSchedule {
        title: String,

        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,

        /// HH:MM, defaults to now
        #[arg(long)]
        start: Option<String>,

        /// HH:MM, defaults to one hour after start
        #[arg(long)]
        end: Option<String>,

        /// personal, group or consultation
        #[arg(long = "type", default_value = "personal")]
        schedule_type: String,

        /// Trainer id, defaults to the first trainer
        #[arg(long)]
        trainer: Option<i64>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        max_participants: Option<u32>,
    },
    /// Add a post to a member's feed
    Post {
        member_id: i64,

        content: String,

        /// workout, progress or note
        #[arg(long = "type", default_value = "workout")]
        post_type: String,

        #[arg(long)]
        image: Option<PathBuf>,

        /// Workout duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        calories: Option<u32>,

        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Log in and save the issued token to the config file
    Login {
        username: String,

        /// Read from stdin when omitted
        #[arg(long, env = "GYM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let client = ApiClient::new(&config, Arc::new(TokenStore::new(config.token.clone())))
        .context("Failed to create API client")?;
    info!("Using API at {}", client.base_url());

    match cli.command {
        Commands::Calendar { year, month, select } => show_calendar(&client, year, month, select).await,
        Commands::Day { date } => show_day(&client, &date).await,
        Commands::Summary { year, month } => show_summary(&client, year, month).await,
        Commands::Members => show_members(&client).await,
        Commands::AddMember {
            name,
            phone,
            email,
            gender,
            birth_date,
            join_date,
            trainer,
            goals,
        } => {
            let gender = match gender.as_deref().map(str::to_ascii_uppercase).as_deref() {
                None => Gender::Unspecified,
                Some("M") => Gender::Male,
                Some("F") => Gender::Female,
                Some(other) => bail!("Unknown gender '{other}', expected M or F"),
            };
            let mut form = match join_date {
                Some(join_date) => MemberFormState::with_join_date(&join_date),
                None => MemberFormState::new(),
            };
            form.name = name;
            form.phone = phone;
            form.email = email.unwrap_or_default();
            form.gender = gender;
            form.birth_date = birth_date.unwrap_or_default();
            form.trainer = trainer;
            form.goals = goals.unwrap_or_default();
            add_member(&client, form).await
        }
        Commands::Feed { member_id } => show_feed(&client, member_id).await,
        Commands::AddSchedule {
            title,
            date,
            start,
            end,
            schedule_type,
            trainer,
            description,
            max_participants,
        } => {
            let schedule_type = ScheduleType::from_code(&schedule_type)
                .filter(|t| *t != ScheduleType::Other)
                .with_context(|| format!("Unknown schedule type '{schedule_type}'"))?;
            let draft = ScheduleDraft {
                title,
                date,
                start,
                end,
                schedule_type,
                trainer,
                description,
                max_participants,
            };
            add_schedule(&client, draft).await
        }
        Commands::Post {
            member_id,
            content,
            post_type,
            image,
            duration,
            calories,
            weight,
        } => {
            let post_type =
                PostType::from_code(&post_type).with_context(|| format!("Unknown post type '{post_type}'"))?;
            let form = PostFormState {
                post_type,
                content,
                image,
                workout_duration: duration,
                calories_burned: calories,
                weight,
            };
            add_post(&client, form, member_id).await
        }
        Commands::Login { username, password } => login(&client, config, cli.config, &username, password).await,
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_env_overrides();

    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }

    config.validate()?;
    Ok(config)
}

fn target_month(year: Option<i32>, month: Option<u32>) -> YearMonth {
    let current = YearMonth::current();
    let year = year.unwrap_or(current.year());
    let month0 = month.map(|m| m as i32 - 1).unwrap_or(current.month0() as i32);
    YearMonth::new(year, month0)
}

/// Move the controller to `month` and load its schedules
async fn load_month(controller: &mut CalendarController, client: &ApiClient, month: YearMonth) -> Result<()> {
    let ticket = controller.go_to_month(month);
    let result = client.fetch_month_schedules(ticket.month()).await;

    match controller.apply_fetch(ticket, result) {
        FetchOutcome::Applied => Ok(()),
        FetchOutcome::Failed => bail!(
            "Could not load schedules for {}: {}",
            month.title(),
            controller.error().unwrap_or("unknown error")
        ),
        FetchOutcome::Stale => bail!("Schedules for {} were superseded", month.title()),
    }
}

async fn show_calendar(client: &ApiClient, year: Option<i32>, month: Option<u32>, select: Option<String>) -> Result<()> {
    let month = target_month(year, month);
    let mut controller = CalendarController::starting_at(month, today());
    load_month(&mut controller, client, month).await?;

    if let Some(date) = select {
        if !controller.select_date_key(&date) {
            bail!("{} is not a day of {}", date, controller.current_month().title());
        }
    }

    println!("{}", render_calendar_text(&controller.render()));
    println!();
    println!("{}", render_day_text(controller.selected_date(), controller.selected_schedules()));
    Ok(())
}

async fn show_day(client: &ApiClient, date: &str) -> Result<()> {
    let day = parse_date_string(date).with_context(|| format!("'{date}' is not a YYYY-MM-DD date"))?;

    let month = YearMonth::from_date(day);
    let mut controller = CalendarController::starting_at(month, today());
    load_month(&mut controller, client, month).await?;
    controller.select_date_key(date);

    println!("{}", render_day_text(controller.selected_date(), controller.selected_schedules()));
    Ok(())
}

async fn show_summary(client: &ApiClient, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let month = target_month(year, month);
    let mut controller = CalendarController::starting_at(month, today());
    load_month(&mut controller, client, month).await?;

    let view = render_monthly_schedule(month, &controller.summary());
    println!("{}", render_monthly_text(&view));
    Ok(())
}

async fn show_members(client: &ApiClient) -> Result<()> {
    let mut members = MembersController::new();
    if !members.load_members(client).await {
        bail!("Could not load members: {}", members.error().unwrap_or("unknown error"));
    }

    println!("{}", render_member_list_text(members.members(), None));
    Ok(())
}

async fn add_member(client: &ApiClient, form: MemberFormState) -> Result<()> {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(errors) => bail!(
            "{}",
            errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "Invalid member".to_string())
        ),
    };

    let member = client
        .create_member(&request)
        .await
        .context("Failed to register member")?;

    println!("Member '{}' registered (id {})", member.name, member.id);
    Ok(())
}

async fn open_feed(client: &ApiClient, members: &mut MembersController, member_id: i64) -> Result<()> {
    if !members.load_members(client).await {
        bail!("Could not load members: {}", members.error().unwrap_or("unknown error"));
    }
    if members.open_member(client, member_id).await != FetchOutcome::Applied {
        bail!("Could not load feed: {}", members.error().unwrap_or("unknown error"));
    }
    Ok(())
}

async fn show_feed(client: &ApiClient, member_id: i64) -> Result<()> {
    let mut members = MembersController::new();
    open_feed(client, &mut members, member_id).await?;

    if let Some(view) = members.render_detail(Utc::now(), |path| client.image_url(path)) {
        println!("{}", render_member_detail_text(&view));
    }
    Ok(())
}

async fn add_post(client: &ApiClient, form: PostFormState, member_id: i64) -> Result<()> {
    let mut members = MembersController::new();
    open_feed(client, &mut members, member_id).await?;
    *members.form_mut() = form;

    if !members.submit_post(client).await {
        bail!("Could not add post: {}", members.error().unwrap_or("unknown error"));
    }

    println!("{}", members.notice().unwrap_or("Post added"));
    if let Some(view) = members.render_detail(Utc::now(), |path| client.image_url(path)) {
        println!("\n{}", render_member_detail_text(&view));
    }
    Ok(())
}

struct ScheduleDraft {
    title: String,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    schedule_type: ScheduleType,
    trainer: Option<i64>,
    description: Option<String>,
    max_participants: Option<u32>,
}

async fn add_schedule(client: &ApiClient, draft: ScheduleDraft) -> Result<()> {
    let service = ScheduleFormService::new();
    let date = draft.date.unwrap_or_else(|| to_date_key(today()));

    let mut state = match &draft.start {
        Some(start) => service.create_form_state_at(&date, start),
        None => service.create_form_state(&date),
    };
    state.title = draft.title;
    service.set_schedule_type(&mut state, draft.schedule_type);
    if let Some(end) = draft.end {
        state.end_time = end;
    }
    if let Some(description) = draft.description {
        state.description = description;
    }
    if let Some(max) = draft.max_participants {
        state.max_participants = max;
    }

    state.trainer = draft.trainer;
    if state.trainer.is_none() {
        let trainers = client.get_trainers().await.context("Failed to load trainers")?;
        service.select_default_trainer(&mut state, &trainers);
    }

    let request = match service.create_schedule_request(&state) {
        Ok(request) => request,
        Err(errors) => bail!(
            "{}",
            service
                .get_first_error_message(&errors)
                .unwrap_or_else(|| "Invalid schedule".to_string())
        ),
    };

    let created = client
        .create_schedule(&request)
        .await
        .context("Failed to create schedule")?;

    println!("{}", service.generate_success_message(&created.title));
    Ok(())
}

async fn login(
    client: &ApiClient,
    mut config: ClientConfig,
    config_path: Option<PathBuf>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            eprint!("Password: ");
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password")?;
            line.trim_end_matches(&['\r', '\n'][..]).to_string()
        }
    };

    let token = client
        .login(username, &password)
        .await
        .context("Login failed")?;

    let path = match config_path.or_else(ClientConfig::default_path) {
        Some(path) => path,
        None => bail!("No config directory available to save the token"),
    };
    config.token = Some(token);
    config.save(&path)?;

    println!("Logged in as {username}; token saved to {}", path.display());
    Ok(())
}
