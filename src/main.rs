fn main() -> std::io::Result<()> {
    bitboard_chess::uci::run_uci_loop()
}
