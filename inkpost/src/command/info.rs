use super::Context;
use crate::VERSION;
use inkpost_client::settings::Settings;

pub fn run(ctx: &Context) {
    let env_config_dir = std::env::var("INKPOST_CONFIG_DIR");
    let vars = format!(
        "VARS:\nINKPOST_CONFIG_DIR = {:?}",
        env_config_dir.unwrap_or("None".into())
    );
    println!("{vars}\n");

    let settings = &ctx.settings;
    let mut paths = String::from("PATHS:\n");
    paths.push_str(&format!("config_path: {:?}\n", Settings::config_file()));
    paths.push_str(&format!("data_dir: {:?}", settings.data_dir));
    println!("{paths}\n");

    println!("SERVER:");
    println!("api_url: {}", settings.api_url);
    println!("timeout: {}s\n", settings.request_timeout_secs);

    println!("ACCOUNT:");
    match ctx.session.current() {
        Some(session) => {
            println!("Auth: {} <{}>", session.username, session.email);
            println!("Role: {}", session.role);
        }
        None => println!("Auth: Unauthenticated"),
    }

    println!();
    println!("Version: {VERSION}");
}
