use std::io::Write as _;

use async_trait::async_trait;
use campus_onboarding::config::{StoreConfig, WizardConfig};
use campus_onboarding::error::LocationError;
use campus_onboarding::location::{GeoPoint, LocationProvider};
use campus_onboarding::options::OptionCatalog;
use campus_onboarding::store::{ProfileStore, RestStore};
use campus_onboarding::wizard::{
    Advance, Gender, GenderPreference, Photo, Retreat, Vibe, WizardSession, WizardStep, submit,
};

/// Device position from the environment. Real devices plug in their own
/// `LocationProvider`; the CLI reads `ONBOARDING_DEVICE_LAT`/`_LON`.
struct EnvLocation;

#[async_trait]
impl LocationProvider for EnvLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        let lat = std::env::var("ONBOARDING_DEVICE_LAT")
            .map_err(|_| LocationError::Unsupported)?;
        let lon = std::env::var("ONBOARDING_DEVICE_LON")
            .map_err(|_| LocationError::Unsupported)?;
        let latitude: f64 = lat
            .parse()
            .map_err(|e| LocationError::PositionUnavailable(format!("bad latitude: {e}")))?;
        let longitude: f64 = lon
            .parse()
            .map_err(|e| LocationError::PositionUnavailable(format!("bad longitude: {e}")))?;
        Ok(GeoPoint::new(latitude, longitude))
    }
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let store_config = StoreConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export ONBOARDING_BACKEND_URL=https://<project>.supabase.co");
        eprintln!("  export ONBOARDING_BACKEND_KEY=<anon key>");
        std::process::exit(1);
    });

    eprintln!("🎓 Campus Onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", store_config.base_url);
    eprintln!("   Type /back at any prompt to go to the previous step.\n");

    let store = RestStore::new(store_config);
    let catalog = OptionCatalog::load(&store).await;
    if catalog.buildings.is_empty() {
        eprintln!("   Note: no buildings loaded; location will be manual entry.\n");
    }

    let mut session = WizardSession::new(WizardConfig::default());

    loop {
        let went_back = match session.step() {
            WizardStep::Basics => run_basics(&mut session)?,
            WizardStep::Photos => run_photos(&mut session).await?,
            WizardStep::Gender => run_gender(&mut session)?,
            WizardStep::Interests => run_interests(&mut session, &catalog)?,
            WizardStep::Location => run_location(&mut session, &catalog).await?,
            WizardStep::Review => match run_review(&mut session, &store).await? {
                ReviewOutcome::Submitted => return Ok(()),
                ReviewOutcome::Back => true,
            },
        };

        if went_back && matches!(session.back(), Retreat::Exited) {
            println!("Leaving onboarding — nothing was saved.");
            return Ok(());
        }

        if !went_back {
            if let Err(e) = session.advance() {
                println!("✗ {e}");
            }
        }
    }
}

/// Returns true when the user asked to go back a step.
fn run_basics(session: &mut WizardSession) -> anyhow::Result<bool> {
    println!("— Basics —");
    let name = prompt("Name")?;
    if name == "/back" {
        return Ok(true);
    }
    if !name.is_empty() {
        session.draft.name = name;
    }

    let year = prompt("Class year (e.g. 2027)")?;
    if year == "/back" {
        return Ok(true);
    }
    match year.parse::<u16>() {
        Ok(y) => session.draft.class_year = Some(y),
        Err(_) if !year.is_empty() => println!("✗ Not a year: {year}"),
        Err(_) => {}
    }

    let major = prompt("Major")?;
    if major == "/back" {
        return Ok(true);
    }
    if !major.is_empty() {
        session.draft.major = major;
    }

    let bio = prompt("Bio (optional)")?;
    if bio == "/back" {
        return Ok(true);
    }
    session.draft.bio = bio;
    Ok(false)
}

async fn run_photos(session: &mut WizardSession) -> anyhow::Result<bool> {
    println!(
        "— Photos — ({}/{} staged, blank to continue)",
        session.draft.photos.len(),
        session.config().max_photos
    );
    loop {
        let path = prompt("Photo path")?;
        if path == "/back" {
            return Ok(true);
        }
        if path.is_empty() {
            return Ok(false);
        }
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let file_name = path.rsplit('/').next().unwrap_or(&path).to_string();
                let photo = Photo::new(bytes, file_name, content_type_for(&path));
                match session.add_photo(photo) {
                    Ok(()) => println!("  staged ({} total)", session.draft.photos.len()),
                    Err(e) => println!("✗ {e}"),
                }
            }
            Err(e) => println!("✗ Could not read {path}: {e}"),
        }
    }
}

fn run_gender(session: &mut WizardSession) -> anyhow::Result<bool> {
    println!("— About you —");

    let g = prompt("Gender [1=woman 2=man 3=non-binary]")?;
    if g == "/back" {
        return Ok(true);
    }
    session.draft.gender = match g.as_str() {
        "1" => Some(Gender::Woman),
        "2" => Some(Gender::Man),
        "3" => Some(Gender::NonBinary),
        _ => session.draft.gender,
    };

    let p = prompt("Show me [1=women 2=men 3=everyone, blank to skip]")?;
    if p == "/back" {
        return Ok(true);
    }
    session.draft.preference = match p.as_str() {
        "1" => Some(GenderPreference::Women),
        "2" => Some(GenderPreference::Men),
        "3" => Some(GenderPreference::Everyone),
        _ => session.draft.preference,
    };

    let v = prompt("Here for [1=dating 2=friends 3=open]")?;
    if v == "/back" {
        return Ok(true);
    }
    session.draft.vibe = match v.as_str() {
        "1" => Some(Vibe::Dating),
        "2" => Some(Vibe::Friends),
        "3" => Some(Vibe::Open),
        _ => session.draft.vibe,
    };
    Ok(false)
}

fn run_interests(session: &mut WizardSession, catalog: &OptionCatalog) -> anyhow::Result<bool> {
    println!("— Interests & clubs —");
    if !catalog.interests.is_empty() {
        let names: Vec<&str> = catalog.interests.iter().map(|t| t.name.as_str()).collect();
        println!("  Suggestions: {}", names.join(", "));
    }
    loop {
        let name = prompt(&format!(
            "Toggle interest ({}/{}, blank to continue)",
            session.draft.interests.len(),
            session.config().max_interests
        ))?;
        if name == "/back" {
            return Ok(true);
        }
        if name.is_empty() {
            break;
        }
        match session.toggle_interest(&name) {
            Ok(true) => println!("  + {name}"),
            Ok(false) => println!("  - {name}"),
            Err(e) => println!("✗ {e}"),
        }
    }

    if !catalog.clubs.is_empty() {
        let names: Vec<&str> = catalog.clubs.iter().map(|t| t.name.as_str()).collect();
        println!("  Clubs on campus: {}", names.join(", "));
    }
    loop {
        let name = prompt(&format!(
            "Toggle club ({}/{}, blank to continue)",
            session.draft.clubs.len(),
            session.config().max_clubs
        ))?;
        if name == "/back" {
            return Ok(true);
        }
        if name.is_empty() {
            return Ok(false);
        }
        match session.toggle_club(&name) {
            Ok(true) => println!("  + {name}"),
            Ok(false) => println!("  - {name}"),
            Err(e) => println!("✗ {e}"),
        }
    }
}

async fn run_location(
    session: &mut WizardSession,
    catalog: &OptionCatalog,
) -> anyhow::Result<bool> {
    println!("— Location —");

    match session.locate_nearest(&EnvLocation, &catalog.buildings).await {
        Ok(Some(building)) => {
            println!("  Nearest building: {}", building.name);
            let answer = prompt("Use it? [Y/n]")?;
            if answer == "/back" {
                return Ok(true);
            }
            if answer.is_empty() || answer.eq_ignore_ascii_case("y") {
                return Ok(false);
            }
            session.draft.building = None;
        }
        Ok(None) => println!("  No buildings to match against."),
        Err(e) => println!("  Location unavailable ({e}); pick manually."),
    }

    if catalog.buildings.is_empty() {
        println!("  No buildings are available right now — going back.");
        return Ok(true);
    }

    loop {
        let name = prompt("Building name")?;
        if name == "/back" {
            return Ok(true);
        }
        match catalog.building_by_name(&name) {
            Some(b) => {
                session.draft.building = Some(b.clone());
                return Ok(false);
            }
            None => println!("✗ Unknown building: {name}"),
        }
    }
}

enum ReviewOutcome {
    Submitted,
    Back,
}

async fn run_review(
    session: &mut WizardSession,
    store: &dyn ProfileStore,
) -> anyhow::Result<ReviewOutcome> {
    let draft = &session.draft;
    println!("— Review —");
    println!("  Name:      {}", draft.name);
    println!(
        "  Year:      {}",
        draft.class_year.map(|y| y.to_string()).unwrap_or_default()
    );
    println!("  Major:     {}", draft.major);
    println!("  Photos:    {}", draft.photos.len());
    println!("  Interests: {}", draft.interests.join(", "));
    println!("  Clubs:     {}", draft.clubs.join(", "));
    println!(
        "  Building:  {}",
        draft.building.as_ref().map(|b| b.name.as_str()).unwrap_or("")
    );

    let answer = prompt("Create profile? [y/N]")?;
    if answer == "/back" || !answer.eq_ignore_ascii_case("y") {
        return Ok(ReviewOutcome::Back);
    }

    // Advance validates the full draft before we hit the network.
    match session.advance() {
        Ok(Advance::ReadyToSubmit) => {}
        Ok(Advance::Moved(step)) => {
            println!("✗ Not at the review step (at {step})");
            return Ok(ReviewOutcome::Back);
        }
        Err(e) => {
            println!("✗ {e}");
            return Ok(ReviewOutcome::Back);
        }
    }

    match submit(store, &session.draft).await {
        Ok(report) => {
            println!(
                "✓ Profile created — {}/{} photos uploaded, {} interests, {} clubs linked.",
                report.photos_uploaded,
                report.photos_total,
                report.interests_linked,
                report.clubs_linked
            );
            if report.photos_uploaded < report.photos_total {
                println!("  Some photos failed to upload; you can retry them later.");
            }
            Ok(ReviewOutcome::Submitted)
        }
        Err(e) => {
            println!("✗ Submission failed: {e}");
            println!("  Some data may have been partially saved.");
            Ok(ReviewOutcome::Back)
        }
    }
}
