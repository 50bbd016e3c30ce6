use totp_engine::{Secret, Totp, TotpConfig};

fn main() {
    // create an engine from a base32 secret, formatted the way users often type it
    let secret_b32 =
        Secret::Encoded(String::from("obwg c2lo fvzx i4tj nztS 243f mnzg k5bn gezd g"));
    let totp_b32 = Totp::new(secret_b32.clone(), 30).unwrap();

    println!(
        "base32 {} ; canonical {} ; raw {}",
        secret_b32,
        secret_b32.to_encoded(),
        secret_b32.to_raw()
    );
    println!("code from base32:\t{}", totp_b32.now().unwrap());

    // create an engine from raw binary value
    let secret = [
        0x70, 0x6c, 0x61, 0x69, 0x6e, 0x2d, 0x73, 0x74, 0x72, 0x69, 0x6e, 0x67, 0x2d, 0x73, 0x65,
        0x63, 0x72, 0x65, 0x74, 0x2d, 0x31, 0x32, 0x33,
    ];
    let secret_raw = Secret::Raw(secret.to_vec());
    let totp_raw = Totp::new(secret_raw.clone(), 30).unwrap();

    println!("raw {} ; base32 {}", secret_raw, secret_raw.to_encoded());
    println!("code from raw secret:\t{}", totp_raw.now().unwrap());

    // a strict engine refuses the sloppy secret
    let mut config = TotpConfig::default();
    config.strict(true);
    match Totp::with_config(secret_b32, &config) {
        Ok(_) => println!("strict engine accepted the secret"),
        Err(e) => println!("strict engine refused the secret: {}", e),
    }
}
