use keyed_store::{
    create_app_config, validate_login_form, Env, KeyedStore, LoginForm, Repository, User,
    UserDirectory,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A plain repository of users
    let mut users = KeyedStore::new();
    users.add(User::new(1, "ada", "ada@example.com"))?;
    users.add(User::new(2, "grace", "grace@example.com"))?;

    println!("all users: {:?}", users.get_all());
    println!("user 2: {:?}", users.get_by_id(2));

    if let Err(err) = users.add(User::new(2, "imposter", "x@example.com")) {
        println!("rejected: {}", err);
    }

    users.remove(1);
    println!("after removing 1: {:?}", users.get_all());

    // Directory with roles and permissions
    let directory = UserDirectory::seeded()?;
    let response = directory.fetch_user_detail(1).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    // Per-environment config
    println!("dev: {:?}", create_app_config(Env::Dev));
    println!("prod: {:?}", create_app_config(Env::Prod));

    // Login form validation
    for form in [
        LoginForm::new("", "secret123"),
        LoginForm::new("ada", "123"),
        LoginForm::new("ada", "secret123"),
    ] {
        println!("{:?} -> {:?}", form, validate_login_form(&form));
    }

    Ok(())
}
