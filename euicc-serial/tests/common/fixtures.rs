// fixtures.rs — commonly used APDUs and card answers

/// Decode a hex string, spaces allowed.
pub fn bytes(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).expect("valid hex fixture")
}

/// ISD-R application identifier.
pub fn isd_r_aid() -> Vec<u8> {
    bytes("A0 00 00 05 59 10 10 FF FF FF FF 89 00 00 01 00")
}

/// GET EID as an ES10 STORE DATA: case 4, Lc=6, Le=0 trailing.
pub fn get_eid_command() -> Vec<u8> {
    bytes("81 E2 91 00 06 BF 3E 03 5C 01 5A 00")
}

/// READ BINARY asking for five bytes.
pub fn read_binary_le5() -> Vec<u8> {
    bytes("00 B0 00 00 05")
}

/// UPDATE BINARY with three data bytes and no Le.
pub fn update_binary_lc3() -> Vec<u8> {
    bytes("00 D6 00 00 03 01 02 03")
}

/// READ BINARY with Le=0 (length left to the card).
pub fn read_binary_open_ended() -> Vec<u8> {
    bytes("00 B0 00 00 00")
}
