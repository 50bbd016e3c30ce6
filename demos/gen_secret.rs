use totp_engine::{Secret, Totp};

fn main() {
    let secret = Secret::generate_secret();

    let totp = Totp::new(secret.clone(), 30).unwrap();

    println!(
        "secret base32: {} ; secret raw: {} ; code: {}",
        secret,
        secret.to_raw(),
        totp.now().unwrap()
    );
    println!("{}", totp.get_url("account", "my-org.com"));
    println!("{}", totp.get_qr_code_url("account", "my-org.com", 200));
}
