use totp_engine::Totp;

// Secret of the demo account, never hard-code a real one
const DEMO_SECRET: &str = "JBSWY3DPEHPK3PXP";

fn main() {
    let totp = Totp::new(DEMO_SECRET, 30).unwrap();

    println!("{{\"current_code\":\"{}\"}}", totp.now().unwrap());
}
