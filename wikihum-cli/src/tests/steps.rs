//! Behaviour-driven step definitions for connection settings.

use super::*;
use crate::connection::ARG_BOT_USERNAME;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wikihum_data::WikibaseConfig;

/// Connection layers and the resolved outcome of one scenario.
#[derive(Debug, Default)]
struct ConnectionWorld {
    cli: RefCell<ConnectionArgs>,
    env: RefCell<ConnectionArgs>,
    file: RefCell<ConnectionArgs>,
    result: RefCell<Option<Result<WikibaseConfig, CliError>>>,
}

#[fixture]
fn world() -> ConnectionWorld {
    ConnectionWorld::default()
}

fn layered(target: Option<String>, env: Option<String>, file: Option<String>) -> Option<String> {
    target.or(env).or(file)
}

/// CLI values win over environment values, which win over the file.
fn merge_layers(cli: ConnectionArgs, env: ConnectionArgs, file: ConnectionArgs) -> ConnectionArgs {
    ConnectionArgs {
        wikibase_url: layered(cli.wikibase_url, env.wikibase_url, file.wikibase_url),
        api_url: layered(cli.api_url, env.api_url, file.api_url),
        sparql_url: layered(cli.sparql_url, env.sparql_url, file.sparql_url),
        user_agent: layered(cli.user_agent, env.user_agent, file.user_agent),
        timeout_secs: cli.timeout_secs.or(env.timeout_secs).or(file.timeout_secs),
        access_token: layered(cli.access_token, env.access_token, file.access_token),
        bot_username: layered(cli.bot_username, env.bot_username, file.bot_username),
        bot_password: layered(cli.bot_password, env.bot_password, file.bot_password),
    }
}

fn resolved(world: &ConnectionWorld) -> WikibaseConfig {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success")
        .clone()
}

#[given("no connection settings")]
fn no_settings(#[from(world)] world: &ConnectionWorld) {
    world.cli.replace(ConnectionArgs::default());
    world.env.replace(ConnectionArgs::default());
    world.file.replace(ConnectionArgs::default());
}

#[given("the wiki base URL \"http://config.example\" from a config file")]
fn base_from_file(#[from(world)] world: &ConnectionWorld) {
    world.file.borrow_mut().wikibase_url = Some("http://config.example".to_owned());
}

#[given("the SPARQL URL \"http://env.example/sparql\" from the environment")]
fn sparql_from_env(#[from(world)] world: &ConnectionWorld) {
    world.env.borrow_mut().sparql_url = Some("http://env.example/sparql".to_owned());
}

#[given("the wiki base URL \"http://cli.example\" from a CLI flag")]
fn base_from_cli(#[from(world)] world: &ConnectionWorld) {
    let cli = Cli::try_parse_from([
        "wikihum",
        "--wikibase-url",
        "http://cli.example",
        "simc-pad",
    ])
    .expect("arguments should parse");
    world.cli.replace(cli.connection);
}

#[given("a bot password from the environment")]
fn bot_password_from_env(#[from(world)] world: &ConnectionWorld) {
    world.env.borrow_mut().bot_password = Some("secret".to_owned());
}

#[when("I resolve the connection")]
fn resolve(#[from(world)] world: &ConnectionWorld) {
    let merged = merge_layers(
        world.cli.take(),
        world.env.take(),
        world.file.take(),
    );
    world.result.replace(Some(merged.resolve()));
}

#[then("the API endpoint is \"https://wikihum.lab.dariah.pl/api.php\"")]
fn public_api(#[from(world)] world: &ConnectionWorld) {
    assert_eq!(
        resolved(world).api_url.as_str(),
        "https://wikihum.lab.dariah.pl/api.php"
    );
}

#[then("the API endpoint is \"http://cli.example/api.php\"")]
fn cli_api(#[from(world)] world: &ConnectionWorld) {
    assert_eq!(resolved(world).api_url.as_str(), "http://cli.example/api.php");
}

#[then("the SPARQL endpoint is \"http://env.example/sparql\"")]
fn env_sparql(#[from(world)] world: &ConnectionWorld) {
    assert_eq!(
        resolved(world).sparql_url.as_str(),
        "http://env.example/sparql"
    );
}

#[then("the client connects anonymously")]
fn anonymous(#[from(world)] world: &ConnectionWorld) {
    assert_eq!(resolved(world).credentials, Credentials::Anonymous);
}

#[then("the CLI reports that the \"bot-username\" flag is missing")]
fn reports_missing_username(#[from(world)] world: &ConnectionWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_BOT_USERNAME),
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_connection_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(
            path = "tests/features/connection_settings.feature",
            name = $scenario_title
        )]
        fn $fn_name(#[from(world)] world: ConnectionWorld) {
            let _ = world;
        }
    };
}

register_connection_scenario!(public_instance_default, "using the public instance by default");
register_connection_scenario!(
    layering_cli_config_env,
    "layering CLI, config file, and environment values"
);
register_connection_scenario!(
    rejecting_partial_bot_password,
    "rejecting a bot password without a user name"
);
