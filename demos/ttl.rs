use totp_engine::Totp;

fn main() {
    let totp = Totp::new("JBSWY3DPEHPK3PXP", 30).unwrap();

    loop {
        println!(
            "code {}\t ttl {}\t valid until: {}",
            totp.now().unwrap(),
            totp.ttl().unwrap(),
            totp.next_step_current().unwrap()
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
