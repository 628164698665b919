//! Tests for get-server-info and show-config CLI commands
//!
//! These are simple commands that display static/config information.

use crate::cli::test_helpers::{create_cli_test_services, create_seeded_services};
use crate::common::SEED_SCRIPT;
use scheme_relay::cli::commands::config::{execute as execute_config, ConfigArgs};
use scheme_relay::cli::commands::info::{execute as execute_info, InfoArgs};
use scheme_relay::cli::OutputFormat;

// =============================================================================
// get-server-info tests
// =============================================================================

/// Test getting server info (human format)
#[tokio::test]
async fn test_server_info_human() {
    let services = create_cli_test_services();

    let args = InfoArgs { detailed: false };
    let result = execute_info(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Get server info should succeed");
}

/// Test getting server info (JSON format)
#[tokio::test]
async fn test_server_info_json() {
    let services = create_cli_test_services();

    let args = InfoArgs { detailed: false };
    let result = execute_info(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Get server info (JSON) should succeed");
}

/// Test getting detailed server info
#[tokio::test]
async fn test_server_info_detailed() {
    let (services, _temp) = create_seeded_services(SEED_SCRIPT);

    let args = InfoArgs { detailed: true };
    let result = execute_info(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Get detailed server info should succeed");
}

// =============================================================================
// show-config tests
// =============================================================================

/// Test showing config (human format)
#[tokio::test]
async fn test_show_config_human() {
    let services = create_cli_test_services();

    let args = ConfigArgs { paths: false };
    let result = execute_config(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Show config should succeed");
}

/// Test showing config (JSON format)
#[tokio::test]
async fn test_show_config_json() {
    let services = create_cli_test_services();

    let args = ConfigArgs { paths: false };
    let result = execute_config(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Show config (JSON) should succeed");
}

/// Test showing config with lookup paths
#[tokio::test]
async fn test_show_config_paths() {
    let services = create_cli_test_services();

    let args = ConfigArgs { paths: true };
    let result = execute_config(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Show config with paths should succeed");
}
