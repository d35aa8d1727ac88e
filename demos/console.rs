//! Command-line operations console for a Cash Point Pay terminal.
//!
//! Connection settings come from the environment (see `ClientConfig`) and
//! can be overridden with flags. When an account is available the console
//! logs in first, then runs the requested operation and prints the
//! envelope.
//!
//! ```text
//! CASHPOINT_ADMIN_ACCOUNT=admin CASHPOINT_ADMIN_PASSWORD=... \
//!     cargo run --example console -- payment 500
//! ```

use std::error::Error;
use std::time::Duration;

use clap::{Parser, Subcommand};
use http::Method;
use serde_json::Value;

use cashpoint_client::notify::{LogNotifier, Notifier};
use cashpoint_client::{
    error_codes, items_total, withdraw_total, CashPointClient, ClientConfig, DoorState, DoorStates,
    Endpoint, Envelope, LineItem, Session, SystemStatus, TrackOutcome, TransactionDetails, TransactionKind,
    WithdrawItem, DENOMINATIONS,
};

#[derive(Parser, Debug)]
#[command(name = "cashpoint-console", about = "Cash Point Pay operations console")]
struct Cli {
    /// Server base URL (overrides CASHPOINT_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Operator account (overrides CASHPOINT_ADMIN_ACCOUNT)
    #[arg(long, requires = "password")]
    account: Option<String>,

    /// Operator password (overrides CASHPOINT_ADMIN_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Device status, machine info and cash overview
    Dashboard,
    /// Fixed-amount payment
    Payment {
        amount: String,
        #[arg(long)]
        pos_ref: Option<String>,
    },
    /// Itemized payment; items as NAME:PCS:PRICE
    Pay {
        #[arg(required = true, value_parser = parse_line_item)]
        items: Vec<LineItem>,
        #[arg(long)]
        pos_ref: Option<String>,
    },
    /// Query transactions and print them as a history table
    Track {
        #[arg(required = true)]
        uuids: Vec<String>,
    },
    /// Cancel, stop or continue the running transaction
    Control {
        #[arg(value_parser = ["cancel", "stop", "continue", "reset"])]
        action: String,
    },
    /// Start or end refill mode
    Refill {
        #[arg(long)]
        end: bool,
    },
    Refund {
        amount: String,
    },
    /// Withdraw denominations; items as note:DENO:PCS or coin:DENO:PCS
    Withdraw {
        #[arg(required = true, value_parser = parse_withdraw_item)]
        items: Vec<WithdrawItem>,
    },
    /// Move banknotes from a drum to the cassette
    DrumToCassette {
        drum_id: i64,
        pcs: i64,
    },
    /// Calibration, resets, self test and hopper clearing
    Maintenance {
        #[arg(value_parser = ["calibrate", "reset-cassette", "reset-coin-box", "self-test", "clear-hopper"])]
        action: String,
        /// Hopper to empty with clear-hopper
        #[arg(long, required_if_eq("action", "clear-hopper"))]
        hopper_id: Option<i64>,
    },
    /// Sensor and cassette status
    Sensors,
    /// Cash inventory detail for one module
    CashDetail {
        name: String,
    },
    /// Read or change device settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Set door locks; doors as "NAME=open|close"
    Doors {
        #[arg(required = true, value_parser = parse_door)]
        doors: Vec<(String, DoorState)>,
        /// Open timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Describe an error code, locally and from the device
    Error {
        code: String,
    },
    /// List documented error codes
    Codes,
    /// List registered endpoints
    Endpoints,
    /// Send a request to a registered endpoint by path, e.g. `raw GET /api/cashInfo`
    Raw {
        method: String,
        path: String,
        /// JSON request body
        body: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Banknote denomination and coin tube setups
    Show,
    /// Write the banknote denomination setup from a JSON array
    SetBanknotes { entries: String },
    /// Write the coin tube setup from a JSON array
    SetCoinTubes { entries: String },
    /// Bind a device to the URL it reports to
    Device { device_id: String, url: String },
    /// Set a named user setting
    Setup { name: String, value: i64 },
}

fn parse_line_item(s: &str) -> Result<LineItem, String> {
    let mut parts = s.rsplitn(3, ':');
    let price = parts.next().ok_or("missing price")?;
    let pcs = parts.next().ok_or("expected NAME:PCS:PRICE")?;
    let name = parts.next().ok_or("expected NAME:PCS:PRICE")?;
    Ok(LineItem::new(
        name,
        pcs.parse().map_err(|e| format!("invalid quantity '{pcs}': {e}"))?,
        price.parse().map_err(|e| format!("invalid price '{price}': {e}"))?,
    ))
}

fn parse_withdraw_item(s: &str) -> Result<WithdrawItem, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [kind, deno, pcs] = parts.as_slice() else {
        return Err("expected note:DENO:PCS or coin:DENO:PCS".into());
    };
    let deno: u32 = deno.parse().map_err(|e| format!("invalid denomination '{deno}': {e}"))?;
    if !DENOMINATIONS.contains(&deno) {
        return Err(format!("denomination must be one of {DENOMINATIONS:?}"));
    }
    let pcs: u32 = pcs.parse().map_err(|e| format!("invalid count '{pcs}': {e}"))?;
    match *kind {
        "note" => Ok(WithdrawItem::banknote(deno, pcs)),
        "coin" => Ok(WithdrawItem::coin(deno, pcs)),
        other => Err(format!("unknown kind '{other}'")),
    }
}

fn parse_door(s: &str) -> Result<(String, DoorState), String> {
    let (name, state) = s.split_once('=').ok_or("expected NAME=open|close")?;
    let state = state.parse::<DoorState>().map_err(|e| e.to_string())?;
    Ok((name.trim().to_string(), state))
}

fn print_envelope(envelope: &Envelope) {
    match serde_json::to_string_pretty(envelope) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("could not render response: {e}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    let mut builder = CashPointClient::builder().config(config);
    if let (Some(account), Some(password)) = (cli.account, cli.password) {
        builder = builder.credentials(account, password);
    }
    let client = builder.build()?;

    let notifier = LogNotifier;
    let mut session = Session::new(client.base_url());

    match cli.command {
        Command::Codes => {
            for (code, description) in error_codes::ERROR_CODES {
                println!("{code:<5} {description}");
            }
            return Ok(());
        }
        Command::Endpoints => {
            for endpoint in Endpoint::ALL {
                println!("{:<28} {}", format!("{endpoint:?}"), endpoint.resolve(client.base_url()));
            }
            return Ok(());
        }
        _ => {}
    }

    match client.login_with_configured_credentials().await {
        Ok(login) => {
            notifier.notify("login", &login).await;
            if !session.record_login(client.account().unwrap_or_default(), &login) {
                return Err(format!("login failed: {}", login.message()).into());
            }
        }
        Err(e) => log::warn!("{e}; continuing without login"),
    }

    match cli.command {
        Command::Dashboard => {
            let status = client.machine().get_status().await;
            notifier.notify_failure("status", &status).await;
            if let Ok(parsed) = status.data_as::<SystemStatus>() {
                println!(
                    "note module error: {}, coin module error: {}",
                    parsed.detail.note_error_code, parsed.detail.coin_error_code
                );
                if parsed.has_errors() {
                    println!("errors detected; run `control reset` to return to standby");
                }
            }
            let info = client.machine().get_machine_info().await;
            notifier.notify_failure("machine info", &info).await;
            print_envelope(&info);
            let cash = client.cash().get_cash_info().await;
            notifier.notify_failure("cash info", &cash).await;
            session.cache_snapshot("cash_info", cash);
            if let Some(cash) = session.snapshot("cash_info") {
                print_envelope(cash);
            }
        }
        Command::Payment { amount, pos_ref } => {
            let envelope = match pos_ref {
                Some(pos_ref) => client.payments().pos_payment(&amount, &pos_ref).await,
                None => client.payments().payment(&amount).await,
            };
            notifier.notify("payment", &envelope).await;
            if let Some(uuid) = session.remember(TransactionKind::Payment, &envelope) {
                println!("transaction id: {uuid}");
            }
        }
        Command::Pay { items, pos_ref } => {
            println!("total: {}", items_total(&items));
            let items: Vec<LineItem> = items.into_iter().filter(LineItem::is_filled).collect();
            let envelope = match pos_ref {
                Some(pos_ref) => client.payments().pos_pay(&items, &pos_ref).await,
                None => client.payments().pay(&items).await,
            };
            notifier.notify("pay", &envelope).await;
            if let Some(uuid) = session.remember(TransactionKind::Payment, &envelope) {
                println!("transaction id: {uuid}");
            }
        }
        Command::Track { uuids } => {
            for uuid in uuids {
                if session.is_tracked(&uuid) {
                    continue;
                }
                let query = client.payments().query(&uuid).await;
                if let TrackOutcome::Failed(msg) = session.track(&uuid, &query) {
                    log::warn!("{uuid}: {msg}");
                }
            }
            println!("{:<20} {:<38} {:<16} {:>8} {:>8}", "timestamp", "uuid", "status", "amount", "change");
            for record in session.history() {
                println!(
                    "{:<20} {:<38} {:<16} {:>8} {:>8}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.uuid,
                    record.status.as_deref().unwrap_or("unknown"),
                    record.amount,
                    record.change
                );
                if let Ok(details) = serde_json::from_value::<TransactionDetails>(record.data.clone()) {
                    for row in details.detail {
                        println!(
                            "    {} x{} {}",
                            row.denomination.unwrap_or(Value::Null),
                            row.pcs.unwrap_or(0),
                            row.status.unwrap_or_default()
                        );
                    }
                }
            }
        }
        Command::Control { action } => {
            let payments = client.payments();
            let envelope = match action.as_str() {
                "cancel" => payments.cancel().await,
                "stop" => payments.payment_stop().await,
                "continue" => payments.payment_continue().await,
                _ => client.machine().reset_status().await,
            };
            notifier.notify(&action, &envelope).await;
        }
        Command::Refill { end } => {
            if end {
                let envelope = client.cash().refill_end().await;
                notifier.notify("refill end", &envelope).await;
            } else {
                let envelope = client.cash().refill().await;
                notifier.notify("refill", &envelope).await;
                if let Some(uuid) = session.remember(TransactionKind::Refill, &envelope) {
                    println!("refill id: {uuid}");
                }
            }
        }
        Command::Refund { amount } => {
            let envelope = client.cash().refund(&amount).await;
            notifier.notify("refund", &envelope).await;
            if let Some(uuid) = session.remember(TransactionKind::Refund, &envelope) {
                println!("refund id: {uuid}");
            }
        }
        Command::Withdraw { items } => {
            let items: Vec<WithdrawItem> = items.into_iter().filter(|item| item.pcs > 0).collect();
            println!("total: {}", withdraw_total(&items));
            let envelope = client.cash().withdraw(&items).await;
            notifier.notify("withdraw", &envelope).await;
            if let Some(uuid) = session.remember(TransactionKind::Withdraw, &envelope) {
                println!("withdraw id: {uuid}");
            }
        }
        Command::DrumToCassette { drum_id, pcs } => {
            let envelope = client.maintenance().drum_to_cassette(drum_id, pcs).await;
            notifier.notify("drum to cassette", &envelope).await;
        }
        Command::Maintenance { action, hopper_id } => {
            let maintenance = client.maintenance();
            let envelope = match action.as_str() {
                "calibrate" => maintenance.pd_calibration().await,
                "reset-cassette" => maintenance.reset_cassette().await,
                "reset-coin-box" => maintenance.reset_coin_box().await,
                "self-test" => maintenance.self_test().await,
                _ => maintenance.clear_hopper(hopper_id.unwrap_or_default()).await,
            };
            notifier.notify(&action, &envelope).await;
            print_envelope(&envelope);
        }
        Command::Sensors => {
            let sensors = client.machine().get_sensor_status().await;
            notifier.notify_failure("sensor status", &sensors).await;
            print_envelope(&sensors);
            let cassettes = client.machine().get_cassette_status().await;
            notifier.notify_failure("cassette status", &cassettes).await;
            print_envelope(&cassettes);
        }
        Command::CashDetail { name } => {
            let envelope = client.cash().get_cash_detail_info(&name).await;
            notifier.notify_failure("cash detail", &envelope).await;
            print_envelope(&envelope);
        }
        Command::Settings(command) => {
            let settings = client.settings();
            match command {
                SettingsCommand::Show => {
                    let banknotes = settings.get_banknote_denomination_setup().await;
                    notifier.notify_failure("banknote setup", &banknotes).await;
                    print_envelope(&banknotes);
                    let coins = settings.get_coin_tube_setup().await;
                    notifier.notify_failure("coin tube setup", &coins).await;
                    print_envelope(&coins);
                }
                SettingsCommand::SetBanknotes { entries } => {
                    let entries: Vec<Value> = serde_json::from_str(&entries)?;
                    let envelope = settings.set_banknote_denomination_setup(&entries).await;
                    notifier.notify("banknote setup", &envelope).await;
                }
                SettingsCommand::SetCoinTubes { entries } => {
                    let entries: Vec<Value> = serde_json::from_str(&entries)?;
                    let envelope = settings.set_coin_tube_setup(&entries).await;
                    notifier.notify("coin tube setup", &envelope).await;
                }
                SettingsCommand::Device { device_id, url } => {
                    let envelope = settings.set_device_setting(&device_id, &url).await;
                    notifier.notify("device setting", &envelope).await;
                }
                SettingsCommand::Setup { name, value } => {
                    let envelope = settings.setup_setting(&name, value).await;
                    notifier.notify("setup setting", &envelope).await;
                }
            }
        }
        Command::Raw { method, path, body } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let endpoint = Endpoint::from_path(&path).ok_or_else(|| format!("no registered endpoint at {path}"))?;
            let body: Option<Value> = body.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let envelope = client.raw_request(method, endpoint, body.as_ref()).await;
            notifier.notify_failure(&path, &envelope).await;
            print_envelope(&envelope);
        }
        Command::Doors { doors, timeout } => {
            let doors: DoorStates = doors.into_iter().collect();
            let envelope = client.machine().door_control(&doors, Some(Duration::from_secs(timeout))).await;
            notifier.notify("door control", &envelope).await;
        }
        Command::Error { code } => {
            match error_codes::describe_str(&code) {
                Some(description) => println!("{code}: {description}"),
                None => println!("{code}: not a documented API error code"),
            }
            let envelope = client.machine().get_error_message(&code).await;
            notifier.notify_failure("error message", &envelope).await;
            print_envelope(&envelope);
        }
        Command::Codes | Command::Endpoints => {}
    }

    if session.logged_in {
        let logout = client.logout().await;
        notifier.notify_failure("logout", &logout).await;
        session.record_logout();
    }

    Ok(())
}
