use ferrous_split_domain::ResolvConf;
use std::io::Cursor;
use std::net::IpAddr;

fn parse(contents: &str) -> ResolvConf {
    ResolvConf::from_reader(Cursor::new(contents)).unwrap()
}

#[test]
fn test_comments_and_unknown_lines_ignored() {
    let conf = parse(
        "# Generated by NetworkManager\n\
         ; legacy comment\n\
         domain home.lan\n\
         sortlist 130.155.160.0/255.255.240.0\n\
         nameserver\n\
         garbage line here\n\
         nameserver 192.168.1.1\n",
    );

    assert_eq!(conf.nameservers, vec!["192.168.1.1".parse::<IpAddr>().unwrap()]);
    assert!(conf.search.is_empty());
}

#[test]
fn test_first_valid_nameserver_wins() {
    let conf = parse(
        "nameserver fe80::1%eth0\n\
         nameserver 10.0.0.53\n\
         nameserver 10.0.0.54\n",
    );

    assert_eq!(conf.primary_nameserver(), Some("10.0.0.53".parse().unwrap()));
    assert_eq!(conf.nameservers.len(), 2);
}

#[test]
fn test_ipv6_nameserver() {
    let conf = parse("nameserver 2001:db8::53\n");
    assert_eq!(conf.primary_nameserver(), Some("2001:db8::53".parse().unwrap()));
}

#[test]
fn test_last_search_line_wins() {
    let conf = parse("search a.example\nsearch B.Example. c.example\n");
    assert_eq!(conf.search, vec!["b.example", "c.example"]);
}

#[test]
fn test_options_on_one_line() {
    let conf = parse("options timeout:2 attempts:3 ndots:2 edns0\n");
    assert_eq!(conf.timeout, 2);
    assert_eq!(conf.attempts, 3);
    assert_eq!(conf.ndots, 2);
}

#[test]
fn test_empty_file_has_no_nameserver() {
    let conf = parse("");
    assert_eq!(conf.primary_nameserver(), None);
    assert_eq!(conf, ResolvConf::default());
}

#[test]
fn test_latin1_comment_does_not_hide_nameserver() {
    let contents: &[u8] = b"# serveur g\xe9r\xe9 par DHCP\nsearch corp.lan\nnameserver 10.0.0.53\n";
    let conf = ResolvConf::from_reader(Cursor::new(contents)).unwrap();

    assert_eq!(conf.primary_nameserver(), Some("10.0.0.53".parse().unwrap()));
    assert_eq!(conf.search, vec!["corp.lan"]);
}
